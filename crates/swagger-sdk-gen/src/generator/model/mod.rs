//! The language-neutral API model.
//!
//! Built once by the model builder and read-only afterwards. Per-language naming
//! adjustments never touch these types; they live in `IdentifierOverrides`.

pub mod types;
pub mod version;

use std::collections::BTreeSet;

use bon::Builder;
use indexmap::IndexMap;
use serde_json::Value;
use strum::{Display, IntoStaticStr};

pub use types::{CollectionKind, Primitive, ResponseType, TypeRef};
pub use version::ApiVersion;

pub(crate) const DEFAULT_CATEGORY: &str = "Uncategorized";
pub(crate) const BODY_PARAMETER_NAME: &str = "model";
pub(crate) const TRANSPORT_HEADERS: &[&str] = &["X-Avalara-Client"];
pub(crate) const FETCH_RESULT_PREFIX: &str = "FetchResult";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum HttpVerb {
  Get,
  Put,
  Post,
  Delete,
  Options,
  Head,
  Patch,
}

impl HttpVerb {
  pub fn as_str(self) -> &'static str {
    self.into()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterLocation {
  UriPath,
  QueryString,
  RequestBody,
  Header,
  FormData,
}

impl ParameterLocation {
  /// Classifies a Swagger `in` value.
  pub fn from_swagger(location: &str) -> Option<Self> {
    match location {
      "path" => Some(Self::UriPath),
      "query" => Some(Self::QueryString),
      "body" => Some(Self::RequestBody),
      "header" => Some(Self::Header),
      "formData" => Some(Self::FormData),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    self.into()
  }
}

/// An operation parameter or a model property.
///
/// Model properties carry no location.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Parameter {
  #[builder(into)]
  pub source_name: String,
  #[builder(into)]
  pub clean_name: String,
  #[builder(into)]
  pub stripped_name: String,
  pub type_ref: TypeRef,
  pub location: Option<ParameterLocation>,
  #[builder(default)]
  pub required: bool,
  #[builder(default)]
  pub read_only: bool,
  #[builder(default)]
  pub transport_only: bool,
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub example: Option<String>,
  pub description: Option<String>,
}

impl Parameter {
  pub fn is_at(&self, location: ParameterLocation) -> bool {
    self.location == Some(location)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
  pub name: String,
  pub verb: HttpVerb,
  pub uri: String,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub response: ResponseType,
  pub parameters: Vec<Parameter>,
  pub category: String,
  pub deprecated: bool,
}

impl Operation {
  #[cfg(test)]
  pub fn parameters_at(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
    self.parameters.iter().filter(move |p| p.is_at(location))
  }

  #[cfg(test)]
  pub fn body_parameter(&self) -> Option<&Parameter> {
    self.parameters_at(ParameterLocation::RequestBody).next()
  }

  /// Parameters a generated method accepts: non-body parameters in declared order,
  /// then the body. Transport-only headers are supplied by the client runtime.
  pub fn call_parameters(&self) -> Vec<&Parameter> {
    let (body, rest): (Vec<&Parameter>, Vec<&Parameter>) = self
      .parameters
      .iter()
      .filter(|p| !p.transport_only)
      .partition(|p| p.is_at(ParameterLocation::RequestBody));
    rest.into_iter().chain(body).collect()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
  pub name: String,
  pub description: Option<String>,
  pub properties: Vec<Parameter>,
  pub required: BTreeSet<String>,
  pub example: Option<String>,
}

impl Model {
  /// Wrapper schemas named `FetchResult[Inner]` that page over another model.
  pub fn is_fetch_result(&self) -> bool {
    self.fetch_result_inner().is_some()
  }

  pub fn fetch_result_inner(&self) -> Option<&str> {
    fetch_result_inner(&self.name)
  }
}

/// Splits `FetchResult[Inner]` into `Inner`.
pub(crate) fn fetch_result_inner(name: &str) -> Option<&str> {
  name
    .strip_prefix(FETCH_RESULT_PREFIX)?
    .strip_prefix('[')?
    .strip_suffix(']')
    .filter(|inner| !inner.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deprecation {
  pub date: Option<String>,
  pub version: Option<String>,
  pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumItem {
  pub name: String,
  pub value: Value,
  pub summary: Option<String>,
  pub deprecation: Option<Deprecation>,
}

impl EnumItem {
  /// The raw value as source text: strings unquoted, everything else as JSON.
  pub fn value_literal(&self) -> String {
    match &self.value {
      Value::String(text) => text.clone(),
      other => other.to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
  pub name: String,
  /// The schema type of the item values (`string`, `integer`, ...).
  pub data_type: Primitive,
  pub summary: Option<String>,
  pub items: Vec<EnumItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
  pub name: String,
  pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKind {
  Model,
  Enum,
}

/// The normalized API description shared by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiModel {
  version: ApiVersion,
  categories: Vec<Category>,
  models: IndexMap<String, Model>,
  enums: IndexMap<String, EnumDef>,
}

impl ApiModel {
  /// Categories are sorted by name and operations within each by name.
  pub(crate) fn new(
    version: ApiVersion,
    mut categories: Vec<Category>,
    models: IndexMap<String, Model>,
    enums: IndexMap<String, EnumDef>,
  ) -> Self {
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    for category in &mut categories {
      category.operations.sort_by(|a, b| a.name.cmp(&b.name));
    }
    Self {
      version,
      categories,
      models,
      enums,
    }
  }

  pub fn version(&self) -> &ApiVersion {
    &self.version
  }

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }

  #[cfg(test)]
  pub fn category(&self, name: &str) -> Option<&Category> {
    self.categories.iter().find(|c| c.name == name)
  }

  /// All operations ordered by category, then operation name.
  pub fn operations(&self) -> impl Iterator<Item = &Operation> {
    self.categories.iter().flat_map(|c| c.operations.iter())
  }

  #[cfg(test)]
  pub fn operation(&self, name: &str) -> Option<&Operation> {
    self.operations().find(|op| op.name == name)
  }

  pub fn models(&self) -> impl Iterator<Item = &Model> {
    self.models.values()
  }

  #[cfg(test)]
  pub fn model(&self, name: &str) -> Option<&Model> {
    self.models.get(name)
  }

  pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
    self.enums.values()
  }

  #[cfg(test)]
  pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
    self.enums.get(name)
  }

  pub fn named_kind(&self, name: &str) -> Option<NamedKind> {
    if self.models.contains_key(name) {
      Some(NamedKind::Model)
    } else if self.enums.contains_key(name) {
      Some(NamedKind::Enum)
    } else {
      None
    }
  }

  /// Every named type reference that does not resolve, as `(context, target)` pairs.
  pub fn unresolved_references(&self) -> Vec<(String, String)> {
    let mut missing = vec![];
    let mut check = |context: String, type_ref: &TypeRef| {
      for target in type_ref.named_targets() {
        if self.named_kind(target).is_none() {
          missing.push((context.clone(), target.to_string()));
        }
      }
    };

    for operation in self.operations() {
      for param in &operation.parameters {
        check(
          format!("operation '{}' parameter '{}'", operation.name, param.source_name),
          &param.type_ref,
        );
      }
      if let Some(type_ref) = operation.response.type_ref() {
        check(format!("operation '{}' response", operation.name), type_ref);
      }
    }
    for model in self.models.values() {
      for property in &model.properties {
        check(
          format!("model '{}' property '{}'", model.name, property.source_name),
          &property.type_ref,
        );
      }
    }
    missing
  }
}
