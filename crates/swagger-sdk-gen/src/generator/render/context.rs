//! Serializable views of the API model for one target language.
//!
//! Types are already mapped and identifiers already filtered, so templates only
//! interpolate.

use serde::Serialize;

use crate::generator::{
  errors::GeneratorError,
  languages::{IdentifierKey, IdentifierOverrides, NameForm, TargetLanguage, TypeMapper},
  model::{
    ApiModel, Category, Deprecation, EnumDef, Model, Operation, Parameter, ParameterLocation, ResponseType, TypeRef,
  },
};

#[derive(Debug, Clone, Serialize)]
pub struct ApiView {
  pub language: TargetLanguage,
  pub version: VersionView,
  pub categories: Vec<CategoryView>,
  pub operations: Vec<OperationView>,
  pub models: Vec<ModelView>,
  pub enums: Vec<EnumView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionView {
  pub full: String,
  pub dotted: String,
  pub three_part: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
  pub name: String,
  pub operations: Vec<OperationView>,
}

/// An identifier spelled in each case a template may emit it, after keyword filtering.
#[derive(Debug, Clone, Serialize)]
pub struct CasedNames {
  pub snake_name: String,
  pub camel_name: String,
  pub pascal_name: String,
  pub constant_name: String,
  /// The stripped identifier with its first character lowered.
  pub lower_name: String,
  /// The stripped identifier with its first character raised.
  pub upper_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationView {
  /// Canonical operation identifier, for strings and lookups.
  pub name: String,
  #[serde(flatten)]
  pub names: CasedNames,
  pub category: String,
  pub verb: String,
  pub uri: String,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub deprecated: bool,
  pub response: ResponseView,
  pub parameters: Vec<ParameterView>,
  pub path_parameters: Vec<ParameterView>,
  pub query_parameters: Vec<ParameterView>,
  pub header_parameters: Vec<ParameterView>,
  pub form_parameters: Vec<ParameterView>,
  pub body_parameter: Option<ParameterView>,
  /// Arguments of the generated method: non-body parameters in declared order, then the
  /// body. Transport-only headers are excluded.
  pub call_parameters: Vec<ParameterView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseView {
  /// `typed`, `file`, or `none`.
  pub kind: &'static str,
  #[serde(rename = "type")]
  pub type_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterView {
  pub source_name: String,
  /// Clean identifier after reserved-word filtering.
  pub name: String,
  /// Last package segment after reserved-word filtering.
  pub stripped_name: String,
  #[serde(flatten)]
  pub names: CasedNames,
  pub canonical_name: String,
  pub canonical_stripped_name: String,
  #[serde(rename = "type")]
  pub type_name: String,
  pub location: Option<&'static str>,
  pub required: bool,
  pub read_only: bool,
  pub transport_only: bool,
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub example: Option<String>,
  pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelView {
  pub name: String,
  #[serde(rename = "type")]
  pub type_name: String,
  pub description: Option<String>,
  pub example: Option<String>,
  pub is_fetch_result: bool,
  /// The wrapped model's type for fetch-result wrappers.
  pub inner: Option<String>,
  pub properties: Vec<ParameterView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumView {
  pub name: String,
  #[serde(rename = "type")]
  pub type_name: String,
  pub data_type: String,
  pub is_string: bool,
  pub summary: Option<String>,
  pub items: Vec<EnumItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumItemView {
  pub name: String,
  #[serde(flatten)]
  pub names: CasedNames,
  pub canonical_name: String,
  pub value: String,
  pub summary: Option<String>,
  pub deprecation: Option<DeprecationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeprecationView {
  pub date: Option<String>,
  pub version: Option<String>,
  pub message: Option<String>,
}

impl From<&Deprecation> for DeprecationView {
  fn from(deprecation: &Deprecation) -> Self {
    Self {
      date: deprecation.date.clone(),
      version: deprecation.version.clone(),
      message: deprecation.message.clone(),
    }
  }
}

/// Builds an [`ApiView`], collecting every unmapped type instead of stopping at the first.
pub(crate) struct ViewBuilder<'a> {
  model: &'a ApiModel,
  mapper: TypeMapper,
  overrides: &'a IdentifierOverrides,
  errors: Vec<GeneratorError>,
}

impl<'a> ViewBuilder<'a> {
  pub(crate) fn new(model: &'a ApiModel, mapper: TypeMapper, overrides: &'a IdentifierOverrides) -> Self {
    Self {
      model,
      mapper,
      overrides,
      errors: vec![],
    }
  }

  pub(crate) fn build(mut self) -> Result<ApiView, Vec<GeneratorError>> {
    let model = self.model;
    let version = model.version();
    let version = VersionView {
      full: version.full().to_string(),
      dotted: version.dotted(),
      three_part: version.three_part(),
    };

    let categories: Vec<CategoryView> = model.categories().iter().map(|c| self.category_view(c)).collect();
    let operations = categories.iter().flat_map(|c| c.operations.iter().cloned()).collect();
    let models = model.models().map(|m| self.model_view(m)).collect();
    let enums = model.enums().map(|e| self.enum_view(e)).collect();

    if !self.errors.is_empty() {
      return Err(self.errors);
    }

    Ok(ApiView {
      language: self.mapper.language(),
      version,
      categories,
      operations,
      models,
      enums,
    })
  }

  fn category_view(&mut self, category: &Category) -> CategoryView {
    CategoryView {
      name: category.name.clone(),
      operations: category.operations.iter().map(|op| self.operation_view(op)).collect(),
    }
  }

  fn operation_view(&mut self, operation: &Operation) -> OperationView {
    let parameters: Vec<ParameterView> = operation
      .parameters
      .iter()
      .map(|param| self.operation_parameter_view(operation, param))
      .collect();
    let at = |location| -> Vec<ParameterView> {
      operation
        .parameters
        .iter()
        .zip(&parameters)
        .filter(|(param, _)| param.is_at(location))
        .map(|(_, view)| view.clone())
        .collect()
    };
    let body_parameter = at(ParameterLocation::RequestBody).into_iter().next();
    let call_parameters = operation
      .call_parameters()
      .into_iter()
      .filter_map(|param| {
        operation
          .parameters
          .iter()
          .position(|candidate| std::ptr::eq(candidate, param))
          .map(|index| parameters[index].clone())
      })
      .collect();

    let context = format!("operation '{}' response", operation.name);
    let response = ResponseView {
      kind: match operation.response {
        ResponseType::Typed(_) => "typed",
        ResponseType::FileResult => "file",
        ResponseType::NoContent => "none",
      },
      type_name: self.mapped(self.mapper.map_response(&operation.response, &context)),
    };

    OperationView {
      name: operation.name.clone(),
      names: self.cased_names(
        |form| IdentifierKey::operation(&operation.name, form),
        &operation.name,
        &operation.name,
      ),
      category: operation.category.clone(),
      verb: operation.verb.as_str().to_string(),
      uri: operation.uri.clone(),
      summary: operation.summary.clone(),
      description: operation.description.clone(),
      deprecated: operation.deprecated,
      response,
      path_parameters: at(ParameterLocation::UriPath),
      query_parameters: at(ParameterLocation::QueryString),
      header_parameters: at(ParameterLocation::Header),
      form_parameters: at(ParameterLocation::FormData),
      body_parameter,
      call_parameters,
      parameters,
    }
  }

  fn operation_parameter_view(&mut self, operation: &Operation, param: &Parameter) -> ParameterView {
    let context = format!("operation '{}' parameter '{}'", operation.name, param.source_name);
    self.parameter_view(
      param,
      |form| IdentifierKey::parameter(&operation.name, &param.source_name, form),
      &context,
    )
  }

  fn parameter_view(
    &mut self,
    param: &Parameter,
    key: impl Fn(NameForm) -> IdentifierKey,
    context: &str,
  ) -> ParameterView {
    let type_name = self.mapped(self.mapper.map_parameter(param, self.model, context));
    let resolve = |form| {
      self
        .overrides
        .resolve(&key(form), &param.clean_name, &param.stripped_name)
    };
    ParameterView {
      source_name: param.source_name.clone(),
      name: resolve(NameForm::Clean),
      stripped_name: resolve(NameForm::Stripped),
      names: self.cased_names(&key, &param.clean_name, &param.stripped_name),
      canonical_name: param.clean_name.clone(),
      canonical_stripped_name: param.stripped_name.clone(),
      type_name,
      location: param.location.map(|location| location.as_str()),
      required: param.required,
      read_only: param.read_only,
      transport_only: param.transport_only,
      min_length: param.min_length,
      max_length: param.max_length,
      example: param.example.clone(),
      description: param.description.clone(),
    }
  }

  fn model_view(&mut self, model: &Model) -> ModelView {
    let properties = model
      .properties
      .iter()
      .map(|property| {
        let context = format!("model '{}' property '{}'", model.name, property.source_name);
        self.parameter_view(
          property,
          |form| IdentifierKey::property(&model.name, &property.source_name, form),
          &context,
        )
      })
      .collect();

    ModelView {
      name: model.name.clone(),
      type_name: self.mapper.map_named(&model.name),
      description: model.description.clone(),
      example: model.example.clone(),
      is_fetch_result: model.is_fetch_result(),
      inner: model.fetch_result_inner().map(|inner| self.mapper.map_named(inner)),
      properties,
    }
  }

  fn enum_view(&mut self, enum_def: &EnumDef) -> EnumView {
    let context = format!("enum '{}'", enum_def.name);
    let data_type = self.mapped(
      self
        .mapper
        .map(&TypeRef::Primitive(enum_def.data_type.clone()), &context),
    );

    EnumView {
      name: enum_def.name.clone(),
      type_name: self.mapper.map_named(&enum_def.name),
      data_type,
      is_string: enum_def.data_type.name == "string",
      summary: enum_def.summary.clone(),
      items: enum_def
        .items
        .iter()
        .map(|item| EnumItemView {
          name: self.overrides.resolve(
            &IdentifierKey::enum_item(&enum_def.name, &item.name, NameForm::Stripped),
            &item.name,
            &item.name,
          ),
          names: self.cased_names(
            |form| IdentifierKey::enum_item(&enum_def.name, &item.name, form),
            &item.name,
            &item.name,
          ),
          canonical_name: item.name.clone(),
          value: item.value_literal(),
          summary: item.summary.clone(),
          deprecation: item.deprecation.as_ref().map(DeprecationView::from),
        })
        .collect(),
    }
  }

  fn cased_names(&self, key: impl Fn(NameForm) -> IdentifierKey, clean: &str, stripped: &str) -> CasedNames {
    let resolve = |form| self.overrides.resolve(&key(form), clean, stripped);
    CasedNames {
      snake_name: resolve(NameForm::Snake),
      camel_name: resolve(NameForm::Camel),
      pascal_name: resolve(NameForm::Pascal),
      constant_name: resolve(NameForm::Constant),
      lower_name: resolve(NameForm::FirstLower),
      upper_name: resolve(NameForm::FirstUpper),
    }
  }

  fn mapped(&mut self, result: Result<String, GeneratorError>) -> String {
    result.unwrap_or_else(|err| {
      self.errors.push(err);
      String::new()
    })
  }
}
