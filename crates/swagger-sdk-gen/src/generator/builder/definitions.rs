use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
  generator::{
    builder::{BuildContext, types::SchemaOwner},
    document::RawSchema,
    errors::GeneratorError,
    model::{Model, Parameter},
  },
  naming::identifiers::{clean_identifier, stripped_identifier},
};

impl BuildContext<'_> {
  /// Builds every definition in declared order, collecting errors from all of them.
  pub(crate) fn build_models(
    &mut self,
    definitions: &IndexMap<String, RawSchema>,
  ) -> (IndexMap<String, Model>, Vec<GeneratorError>) {
    let mut models = IndexMap::with_capacity(definitions.len());
    let mut errors = vec![];

    for (name, schema) in definitions {
      match self.build_model(name, schema) {
        Ok(model) => {
          models.insert(name.clone(), model);
        }
        Err(mut model_errors) => errors.append(&mut model_errors),
      }
    }

    (models, errors)
  }

  fn build_model(&mut self, name: &str, schema: &RawSchema) -> Result<Model, Vec<GeneratorError>> {
    let required: BTreeSet<String> = schema.required_names().iter().cloned().collect();
    let mut properties = Vec::with_capacity(schema.properties.len());
    let mut seen = HashSet::new();
    let mut errors = vec![];

    for (property_name, property_schema) in &schema.properties {
      let context = format!("model '{name}' property '{property_name}'");
      let clean_name = clean_identifier(property_name);

      if clean_name.is_empty() {
        errors.push(GeneratorError::inconsistent(&context, "name has no identifier characters"));
        continue;
      }
      if !seen.insert(clean_name.clone()) {
        errors.push(GeneratorError::inconsistent(
          &context,
          format!("identifier '{clean_name}' is declared more than once"),
        ));
        continue;
      }

      let type_ref = match self.type_ref(property_schema, SchemaOwner::new(name, property_name), &context) {
        Ok(type_ref) => type_ref,
        Err(err) => {
          errors.push(err);
          continue;
        }
      };

      properties.push(
        Parameter::builder()
          .source_name(property_name)
          .stripped_name(stripped_identifier(&clean_name))
          .clean_name(clean_name.clone())
          .type_ref(type_ref)
          .required(required.contains(property_name) || property_schema.is_flagged_required())
          .read_only(property_schema.read_only)
          .maybe_min_length(property_schema.min_length)
          .maybe_max_length(property_schema.max_length)
          .maybe_example(property_schema.example.as_ref().map(example_literal))
          .maybe_description(property_schema.description.clone())
          .build(),
      );
    }

    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(Model {
      name: name.to_string(),
      description: schema.description.clone().or_else(|| schema.title.clone()),
      properties,
      required,
      example: schema.example.as_ref().map(example_literal),
    })
  }
}

/// Example values as source text: strings unquoted, everything else as compact JSON.
pub(crate) fn example_literal(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
