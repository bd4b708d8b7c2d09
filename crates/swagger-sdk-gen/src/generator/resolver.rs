use std::collections::{BTreeMap, BTreeSet};

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::{
  generator::{
    document::{RawDocument, RawParameter, RawParameterOrRef, RawSchema},
    errors::{BuildFailure, GeneratorError},
  },
  naming::operations::operation_identifier,
  utils::{parse_definition_ref, parse_parameter_ref},
};

/// Resolves `#/definitions/...` and `#/parameters/...` pointers by name lookup.
///
/// Targets are borrowed from the document at point of use; nothing is copied, so
/// recursive definitions resolve without expansion.
pub(crate) struct ReferenceResolver<'a> {
  document: &'a RawDocument,
}

impl<'a> ReferenceResolver<'a> {
  pub(crate) fn new(document: &'a RawDocument) -> Self {
    Self { document }
  }

  /// Returns the definition name and raw schema a `$ref` points at.
  pub(crate) fn resolve(&self, ref_path: &str, context: &str) -> Result<(&'a str, &'a RawSchema), GeneratorError> {
    parse_definition_ref(ref_path)
      .and_then(|name| self.document.definitions.get_key_value(name.as_str()))
      .map(|(name, schema)| (name.as_str(), schema))
      .ok_or_else(|| GeneratorError::unresolved(context, ref_path))
  }

  pub(crate) fn resolve_parameter<'p>(
    &self,
    parameter: &'p RawParameterOrRef,
    context: &str,
  ) -> Result<&'p RawParameter, GeneratorError>
  where
    'a: 'p,
  {
    match parameter {
      RawParameterOrRef::Inline(raw) => Ok(&**raw),
      RawParameterOrRef::Ref { ref_path } => parse_parameter_ref(ref_path)
        .and_then(|name| self.document.parameters.get(name.as_str()))
        .ok_or_else(|| GeneratorError::unresolved(context, ref_path.as_str())),
    }
  }

  /// Walks every reference in the document and reports all that fail to resolve.
  pub(crate) fn validate(&self) -> Result<(), BuildFailure> {
    let mut errors = vec![];

    for (name, schema) in &self.document.definitions {
      self.check_schema(schema, &format!("model '{name}'"), &mut errors);
    }

    for (path, verb, item, operation) in self.document.operations() {
      let operation_name = operation_identifier(verb.as_str(), path, operation.operation_id.as_deref());
      let context = format!("operation '{operation_name}'");

      for parameter in item.parameters.iter().chain(&operation.parameters) {
        match self.resolve_parameter(parameter, &context) {
          Ok(raw) => {
            let param_context = format!("{context} parameter '{}'", raw.name);
            for schema in raw.schema.iter().chain(raw.items.iter()) {
              self.check_schema(schema, &param_context, &mut errors);
            }
          }
          Err(err) => errors.push(err),
        }
      }

      for (status, response) in &operation.responses {
        if let Some(schema) = &response.schema {
          self.check_schema(schema, &format!("{context} response '{status}'"), &mut errors);
        }
      }
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(BuildFailure { errors })
    }
  }

  fn check_schema(&self, schema: &RawSchema, context: &str, errors: &mut Vec<GeneratorError>) {
    for reference in schema.references() {
      if let Err(err) = self.resolve(reference, context) {
        errors.push(err);
      }
    }
  }

  /// Direct definition-to-definition dependencies.
  pub(crate) fn dependencies(&self) -> BTreeMap<&'a str, BTreeSet<String>> {
    self
      .document
      .definitions
      .iter()
      .map(|(name, schema)| {
        let deps = schema
          .references()
          .into_iter()
          .filter_map(parse_definition_ref)
          .filter(|dep| self.document.definitions.contains_key(dep.as_str()))
          .collect();
        (name.as_str(), deps)
      })
      .collect()
  }

  /// Groups of mutually recursive definitions, including self-references. Each group and
  /// the list itself are sorted.
  pub(crate) fn detect_cycles(&self) -> Vec<Vec<String>> {
    let dependencies = self.dependencies();

    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &dependencies {
      graph.add_node(*node);
      for dep in deps {
        graph.add_edge(*node, dep.as_str(), ());
      }
    }

    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut names: Vec<String> = scc.into_iter().map(String::from).collect();
        names.sort();
        names
      })
      .collect();
    cycles.sort();
    cycles
  }
}
