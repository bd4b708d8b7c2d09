use serde_json::{Value, json};

use crate::generator::{
  builder::{BuildOutput, ModelBuilder, OperationFilter},
  document::RawDocument,
  errors::BuildFailure,
};

pub(crate) fn document(paths: Value, definitions: Value) -> RawDocument {
  serde_json::from_value(json!({
    "swagger": "2.0",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": paths,
    "definitions": definitions,
  }))
  .unwrap()
}

pub(crate) fn build(paths: Value, definitions: Value) -> BuildOutput {
  let doc = document(paths, definitions);
  ModelBuilder::new(&doc).build().unwrap()
}

pub(crate) fn build_filtered(paths: Value, definitions: Value, filter: OperationFilter) -> BuildOutput {
  let doc = document(paths, definitions);
  ModelBuilder::new(&doc).with_filter(filter).build().unwrap()
}

pub(crate) fn build_failure(paths: Value, definitions: Value) -> BuildFailure {
  let doc = document(paths, definitions);
  ModelBuilder::new(&doc).build().unwrap_err()
}

pub(crate) fn error_messages(failure: &BuildFailure) -> Vec<String> {
  failure.errors.iter().map(ToString::to_string).collect()
}

pub(crate) fn ok_response(schema: Value) -> Value {
  json!({ "200": { "description": "Success", "schema": schema } })
}
