use std::collections::{BTreeSet, HashMap, HashSet, hash_map::Entry};

use indexmap::IndexMap;

use crate::{
  generator::{
    builder::{BuildContext, OperationFilter, definitions::example_literal, types::SchemaOwner},
    document::{RawDocument, RawParameter, RawPathItem, RawOperation},
    errors::GeneratorError,
    metrics::{GenerationStats, GenerationWarning},
    model::{
      BODY_PARAMETER_NAME, Category, DEFAULT_CATEGORY, HttpVerb, Operation, Parameter, ParameterLocation,
      TRANSPORT_HEADERS,
    },
  },
  naming::{
    identifiers::{clean_identifier, stripped_identifier},
    operations::{operation_identifier, uri_placeholders},
  },
};

impl<'a> BuildContext<'a> {
  /// Builds every accepted operation and groups them by category.
  pub(crate) fn build_categories(
    &mut self,
    document: &RawDocument,
    filter: &OperationFilter,
    stats: &mut GenerationStats,
  ) -> (Vec<Category>, Vec<GeneratorError>) {
    let mut categories: IndexMap<String, Vec<Operation>> = IndexMap::new();
    let mut seen = HashSet::new();
    let mut errors = vec![];

    for (path, verb, item, raw) in document.operations() {
      let name = operation_identifier(verb.as_str(), path, raw.operation_id.as_deref());
      if !seen.insert(name.clone()) {
        errors.push(GeneratorError::inconsistent(
          format!("operation '{name}'"),
          "operation identifier is declared more than once",
        ));
        continue;
      }
      if !filter.accepts(&name) {
        stats.record_filtered_operation();
        continue;
      }

      match self.build_operation(&name, path, verb, item, raw) {
        Ok(operation) => categories.entry(operation.category.clone()).or_default().push(operation),
        Err(mut operation_errors) => errors.append(&mut operation_errors),
      }
    }

    self.warnings.extend(
      filter
        .unmatched(&seen)
        .into_iter()
        .map(|operation| GenerationWarning::UnmatchedOperationFilter { operation }),
    );

    let categories = categories
      .into_iter()
      .map(|(name, operations)| Category { name, operations })
      .collect();
    (categories, errors)
  }

  fn build_operation(
    &mut self,
    name: &str,
    path: &str,
    verb: HttpVerb,
    item: &RawPathItem,
    raw: &RawOperation,
  ) -> Result<Operation, Vec<GeneratorError>> {
    let context = format!("operation '{name}'");
    let mut errors = vec![];

    let raw_parameters = self.collect_raw_parameters(item, raw, &context, &mut errors);
    let mut parameters = Vec::with_capacity(raw_parameters.len());
    for raw_param in raw_parameters.values() {
      match self.build_parameter(name, raw_param) {
        Ok(param) => parameters.push(param),
        Err(err) => errors.push(err),
      }
    }

    errors.extend(check_parameter_identifiers(&context, &parameters));
    errors.extend(check_placeholders(&context, path, &parameters));

    let response = match self.resolve_response(raw, name) {
      Ok(response) => Some(response),
      Err(err) => {
        errors.push(err);
        None
      }
    };

    match response {
      Some(response) if errors.is_empty() => Ok(Operation {
        name: name.to_string(),
        verb,
        uri: path.to_string(),
        summary: raw.summary.clone(),
        description: raw.description.clone(),
        response,
        parameters,
        category: category_for(raw),
        deprecated: raw.deprecated,
      }),
      _ => Err(errors),
    }
  }

  /// Path-level parameters first, then operation parameters; an operation parameter
  /// with the same name and location replaces the shared one in place.
  fn collect_raw_parameters<'d>(
    &self,
    item: &'d RawPathItem,
    raw: &'d RawOperation,
    context: &str,
    errors: &mut Vec<GeneratorError>,
  ) -> IndexMap<(String, String), &'d RawParameter>
  where
    'a: 'd,
  {
    let mut collected = IndexMap::new();
    for entry in item.parameters.iter().chain(&raw.parameters) {
      match self.resolver.resolve_parameter(entry, context) {
        Ok(param) => {
          collected.insert((param.name.clone(), param.location.clone()), param);
        }
        Err(err) => errors.push(err),
      }
    }
    collected
  }

  fn build_parameter(&mut self, operation_name: &str, raw: &RawParameter) -> Result<Parameter, GeneratorError> {
    let context = format!("operation '{operation_name}' parameter '{}'", raw.name);
    let location = ParameterLocation::from_swagger(&raw.location).ok_or_else(|| {
      GeneratorError::inconsistent(&context, format!("unsupported parameter location '{}'", raw.location))
    })?;
    let owner = SchemaOwner::new(operation_name, &raw.name);

    let (clean_name, type_ref) = if location == ParameterLocation::RequestBody {
      let schema = raw
        .schema
        .as_deref()
        .ok_or_else(|| GeneratorError::inconsistent(&context, "body parameter declares no schema"))?;
      (BODY_PARAMETER_NAME.to_string(), self.type_ref(schema, owner, &context)?)
    } else {
      (clean_identifier(&raw.name), self.type_ref(&raw.as_schema(), owner, &context)?)
    };

    if clean_name.is_empty() {
      return Err(GeneratorError::inconsistent(&context, "name has no identifier characters"));
    }

    let transport_only = location == ParameterLocation::Header
      && TRANSPORT_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(&raw.name));

    Ok(
      Parameter::builder()
        .source_name(&raw.name)
        .stripped_name(stripped_identifier(&clean_name))
        .clean_name(clean_name.clone())
        .type_ref(type_ref)
        .location(location)
        .required(raw.required || location == ParameterLocation::UriPath)
        .transport_only(transport_only)
        .maybe_min_length(raw.min_length)
        .maybe_max_length(raw.max_length)
        .maybe_example(raw.example().map(example_literal))
        .maybe_description(raw.description.clone())
        .build(),
    )
  }
}

/// The first declared tag, or the default category when the operation is untagged.
pub(crate) fn category_for(raw: &RawOperation) -> String {
  raw
    .tags
    .first()
    .map(|tag| tag.trim())
    .filter(|tag| !tag.is_empty())
    .unwrap_or(DEFAULT_CATEGORY)
    .to_string()
}

fn check_parameter_identifiers(context: &str, parameters: &[Parameter]) -> Vec<GeneratorError> {
  let mut errors = vec![];
  let mut seen = HashSet::new();
  for param in parameters {
    if !seen.insert(param.clean_name.as_str()) {
      errors.push(GeneratorError::inconsistent(
        context,
        format!("parameter identifier '{}' is declared more than once", param.clean_name),
      ));
    }
  }

  // Signatures declare call parameters by stripped identifier.
  let mut stripped: HashMap<&str, &str> = HashMap::new();
  for param in parameters.iter().filter(|p| !p.transport_only) {
    match stripped.entry(param.stripped_name.as_str()) {
      Entry::Vacant(slot) => {
        slot.insert(param.clean_name.as_str());
      }
      Entry::Occupied(slot) if *slot.get() != param.clean_name => {
        errors.push(GeneratorError::inconsistent(
          context,
          format!(
            "parameters '{}' and '{}' share the identifier '{}'",
            slot.get(),
            param.clean_name,
            param.stripped_name
          ),
        ));
      }
      Entry::Occupied(_) => {}
    }
  }

  if parameters
    .iter()
    .filter(|p| p.is_at(ParameterLocation::RequestBody))
    .count()
    > 1
  {
    errors.push(GeneratorError::inconsistent(context, "more than one body parameter"));
  }
  errors
}

/// URI placeholders must match the path parameters' source names exactly.
fn check_placeholders(context: &str, path: &str, parameters: &[Parameter]) -> Vec<GeneratorError> {
  let placeholders: BTreeSet<&str> = uri_placeholders(path).into_iter().collect();
  let path_params: BTreeSet<&str> = parameters
    .iter()
    .filter(|p| p.is_at(ParameterLocation::UriPath))
    .map(|p| p.source_name.as_str())
    .collect();

  let missing = placeholders.difference(&path_params).map(|name| {
    GeneratorError::inconsistent(context, format!("placeholder '{{{name}}}' has no path parameter"))
  });
  let unused = path_params.difference(&placeholders).map(|name| {
    GeneratorError::inconsistent(context, format!("path parameter '{name}' does not appear in '{path}'"))
  });
  missing.chain(unused).collect()
}
