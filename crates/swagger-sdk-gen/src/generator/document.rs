//! Raw Swagger 2.0 document types.
//!
//! These mirror the source document verbatim, including the vendor extensions the
//! generator consumes. Nothing here interprets references or classifies parameters;
//! that happens in the resolver and the model builder.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::generator::model::HttpVerb;

pub type RawSecurityRequirement = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
  #[serde(default)]
  pub swagger: Option<String>,
  #[serde(default)]
  pub info: RawInfo,
  #[serde(default)]
  pub host: Option<String>,
  #[serde(default)]
  pub base_path: Option<String>,
  #[serde(default)]
  pub paths: IndexMap<String, RawPathItem>,
  #[serde(default)]
  pub definitions: IndexMap<String, RawSchema>,
  #[serde(default)]
  pub parameters: IndexMap<String, RawParameter>,
  #[serde(default)]
  pub security_definitions: IndexMap<String, Value>,
  #[serde(default)]
  pub security: Vec<RawSecurityRequirement>,
  #[serde(default, rename = "x-avalara-version")]
  pub avalara_version: Option<String>,
  #[serde(default, rename = "x-api-version")]
  pub api_version: Option<String>,
}

impl RawDocument {
  /// The version string published by the document, preferring vendor extensions over
  /// `info.version`.
  pub(crate) fn declared_version(&self) -> Option<&str> {
    [&self.avalara_version, &self.api_version, &self.info.version]
      .into_iter()
      .filter_map(|version| version.as_deref().map(str::trim))
      .find(|version| !version.is_empty())
  }

  /// Iterates every operation as `(path, verb, path item, operation)` in declared order.
  pub(crate) fn operations(&self) -> impl Iterator<Item = (&str, HttpVerb, &RawPathItem, &RawOperation)> {
    self.paths.iter().flat_map(|(path, item)| {
      item
        .operations()
        .map(move |(verb, operation)| (path.as_str(), verb, item, operation))
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInfo {
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPathItem {
  #[serde(default)]
  pub get: Option<RawOperation>,
  #[serde(default)]
  pub put: Option<RawOperation>,
  #[serde(default)]
  pub post: Option<RawOperation>,
  #[serde(default)]
  pub delete: Option<RawOperation>,
  #[serde(default)]
  pub options: Option<RawOperation>,
  #[serde(default)]
  pub head: Option<RawOperation>,
  #[serde(default)]
  pub patch: Option<RawOperation>,
  /// Parameters shared by every operation under this path.
  #[serde(default)]
  pub parameters: Vec<RawParameterOrRef>,
}

impl RawPathItem {
  pub(crate) fn operations(&self) -> impl Iterator<Item = (HttpVerb, &RawOperation)> {
    [
      (HttpVerb::Get, self.get.as_ref()),
      (HttpVerb::Put, self.put.as_ref()),
      (HttpVerb::Post, self.post.as_ref()),
      (HttpVerb::Delete, self.delete.as_ref()),
      (HttpVerb::Options, self.options.as_ref()),
      (HttpVerb::Head, self.head.as_ref()),
      (HttpVerb::Patch, self.patch.as_ref()),
    ]
    .into_iter()
    .filter_map(|(verb, operation)| operation.map(|op| (verb, op)))
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub summary: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub operation_id: Option<String>,
  #[serde(default)]
  pub consumes: Vec<String>,
  #[serde(default)]
  pub produces: Vec<String>,
  #[serde(default)]
  pub parameters: Vec<RawParameterOrRef>,
  #[serde(default)]
  pub responses: IndexMap<String, RawResponse>,
  #[serde(default)]
  pub deprecated: bool,
  #[serde(default)]
  pub security: Vec<RawSecurityRequirement>,
}

/// A parameter entry, either inline or a `$ref` into the document's shared parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawParameterOrRef {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Inline(Box<RawParameter>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub required: bool,
  #[serde(default, rename = "type")]
  pub schema_type: Option<String>,
  #[serde(default)]
  pub format: Option<String>,
  #[serde(default)]
  pub items: Option<Box<RawSchema>>,
  #[serde(default)]
  pub schema: Option<Box<RawSchema>>,
  #[serde(default, rename = "enum")]
  pub enum_values: Option<Vec<Value>>,
  #[serde(default)]
  pub default: Option<Value>,
  #[serde(default)]
  pub min_length: Option<u64>,
  #[serde(default)]
  pub max_length: Option<u64>,
  #[serde(default, rename = "x-example")]
  pub example: Option<Value>,
  #[serde(default, rename = "x-enum-type")]
  pub enum_type: Option<String>,
  #[serde(default, rename = "x-enum-metadata")]
  pub enum_metadata: Option<Vec<RawEnumItemMetadata>>,
  #[serde(default, rename = "x-ms-enum")]
  pub ms_enum: Option<RawMsEnum>,
}

impl RawParameter {
  /// Views a non-body parameter's inline type declaration as a schema.
  pub(crate) fn as_schema(&self) -> RawSchema {
    RawSchema {
      schema_type: self.schema_type.clone(),
      format: self.format.clone(),
      description: self.description.clone(),
      items: self.items.clone(),
      enum_values: self.enum_values.clone(),
      min_length: self.min_length,
      max_length: self.max_length,
      example: self.example().cloned(),
      enum_type: self.enum_type.clone(),
      enum_metadata: self.enum_metadata.clone(),
      ms_enum: self.ms_enum.clone(),
      ..RawSchema::default()
    }
  }

  pub(crate) fn example(&self) -> Option<&Value> {
    self.example.as_ref().or(self.default.as_ref())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub schema: Option<RawSchema>,
}

/// `required` is a name list on object schemas; some documents also mark individual
/// properties with a boolean flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRequired {
  Names(Vec<String>),
  Flag(bool),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAdditionalProperties {
  Allowed(bool),
  Schema(Box<RawSchema>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
  #[serde(default, rename = "$ref")]
  pub reference: Option<String>,
  #[serde(default, rename = "type")]
  pub schema_type: Option<String>,
  #[serde(default)]
  pub format: Option<String>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub required: Option<RawRequired>,
  #[serde(default)]
  pub properties: IndexMap<String, RawSchema>,
  #[serde(default)]
  pub items: Option<Box<RawSchema>>,
  #[serde(default)]
  pub additional_properties: Option<RawAdditionalProperties>,
  #[serde(default, rename = "enum")]
  pub enum_values: Option<Vec<Value>>,
  #[serde(default)]
  pub read_only: bool,
  #[serde(default)]
  pub min_length: Option<u64>,
  #[serde(default)]
  pub max_length: Option<u64>,
  #[serde(default)]
  pub example: Option<Value>,
  #[serde(default, rename = "x-enum-type")]
  pub enum_type: Option<String>,
  #[serde(default, rename = "x-enum-metadata")]
  pub enum_metadata: Option<Vec<RawEnumItemMetadata>>,
  #[serde(default, rename = "x-ms-enum")]
  pub ms_enum: Option<RawMsEnum>,
}

impl RawSchema {
  pub(crate) fn required_names(&self) -> &[String] {
    match &self.required {
      Some(RawRequired::Names(names)) => names,
      _ => &[],
    }
  }

  pub(crate) fn is_flagged_required(&self) -> bool {
    matches!(self.required, Some(RawRequired::Flag(true)))
  }

  /// The enumeration name declared through `x-enum-type` or `x-ms-enum`.
  pub(crate) fn declared_enum_name(&self) -> Option<&str> {
    self
      .enum_type
      .as_deref()
      .or(self.ms_enum.as_ref().map(|ms_enum| ms_enum.name.as_str()))
      .map(str::trim)
      .filter(|name| !name.is_empty())
  }

  /// Every `$ref` string reachable from this schema without following references.
  pub(crate) fn references(&self) -> Vec<&str> {
    let mut refs = vec![];
    self.collect_references(&mut refs);
    refs
  }

  fn collect_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
    if let Some(reference) = &self.reference {
      refs.push(reference);
    }
    if let Some(items) = &self.items {
      items.collect_references(refs);
    }
    for property in self.properties.values() {
      property.collect_references(refs);
    }
    if let Some(RawAdditionalProperties::Schema(schema)) = &self.additional_properties {
      schema.collect_references(refs);
    }
  }
}

/// One entry of an `x-enum-metadata` list.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnumItemMetadata {
  #[serde(default)]
  pub name: Option<String>,
  pub value: Value,
  #[serde(default)]
  pub summary: Option<String>,
  #[serde(default)]
  pub deprecation: Option<RawDeprecation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDeprecation {
  #[serde(default)]
  pub date: Option<String>,
  #[serde(default)]
  pub version: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

/// The `x-ms-enum` extension object; only the name is consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMsEnum {
  pub name: String,
}
