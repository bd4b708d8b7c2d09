use std::collections::HashSet;

use serde_json::json;

use super::support::{build, build_failure, build_filtered, error_messages, ok_response};
use crate::{
  generator::{
    builder::{ModelBuilder, OperationFilter},
    document::RawDocument,
    metrics::GenerationWarning,
    model::{DEFAULT_CATEGORY, HttpVerb, ParameterLocation, TypeRef},
  },
  naming::operations::uri_placeholders,
};

fn locations_paths() -> serde_json::Value {
  json!({
    "/companies/{id}/locations": {
      "get": {
        "tags": ["Locations"],
        "parameters": [
          { "name": "id", "in": "path", "required": true, "type": "integer", "format": "int32" },
          { "name": "$filter", "in": "query", "type": "string" },
          { "name": "X-Avalara-Client", "in": "header", "type": "string" }
        ],
        "responses": ok_response(json!({ "type": "array", "items": { "type": "string" } }))
      }
    }
  })
}

#[test]
fn test_parameter_classification() {
  let output = build(locations_paths(), json!({}));

  let operation = output.model.operation("get_companies_by_id_locations").unwrap();
  assert_eq!(operation.verb, HttpVerb::Get);
  assert_eq!(operation.uri, "/companies/{id}/locations");

  let path_params: Vec<&str> = operation
    .parameters_at(ParameterLocation::UriPath)
    .map(|p| p.source_name.as_str())
    .collect();
  assert_eq!(path_params, vec!["id"]);
  assert_eq!(uri_placeholders(&operation.uri), vec!["id"]);

  let filter = operation.parameters.iter().find(|p| p.source_name == "$filter").unwrap();
  assert_eq!(filter.location, Some(ParameterLocation::QueryString));
  assert_eq!(filter.clean_name, "filter");
  assert!(!filter.required);

  let header = operation
    .parameters
    .iter()
    .find(|p| p.source_name == "X-Avalara-Client")
    .unwrap();
  assert!(header.transport_only);
  assert_eq!(header.location, Some(ParameterLocation::Header));
}

#[test]
fn test_call_parameters_order() {
  let output = build(
    json!({
      "/companies/{companyId}/items": {
        "post": {
          "operationId": "CreateItems",
          "parameters": [
            { "name": "items", "in": "body", "required": true, "schema": { "type": "array", "items": { "type": "string" } } },
            { "name": "companyId", "in": "path", "required": true, "type": "integer" },
            { "name": "x-avalara-client", "in": "header", "type": "string" },
            { "name": "$include", "in": "query", "type": "string" }
          ],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let operation = output.model.operation("CreateItems").unwrap();
  let call: Vec<&str> = operation.call_parameters().iter().map(|p| p.clean_name.as_str()).collect();
  assert_eq!(call, vec!["companyId", "include", "model"]);

  let body = operation.body_parameter().unwrap();
  assert_eq!(body.source_name, "items");
  assert_eq!(body.type_ref, TypeRef::array(TypeRef::string()));
}

#[test]
fn test_path_parameters_always_required() {
  let output = build(
    json!({
      "/things/{id}": {
        "get": {
          "operationId": "GetThing",
          "parameters": [{ "name": "id", "in": "path", "type": "string" }],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let operation = output.model.operation("GetThing").unwrap();
  assert!(operation.parameters[0].required);
}

#[test]
fn test_category_grouping_with_default() {
  let output = build(
    json!({
      "/a": {
        "get": { "operationId": "ListA", "tags": ["Shared"], "responses": ok_response(json!({ "type": "string" })) },
        "post": { "operationId": "CreateA", "tags": ["Shared", "Other"], "responses": ok_response(json!({ "type": "string" })) }
      },
      "/b": {
        "get": { "operationId": "ListB", "responses": ok_response(json!({ "type": "string" })) }
      },
      "/c": {
        "get": { "operationId": "ListC", "tags": [], "responses": ok_response(json!({ "type": "string" })) }
      }
    }),
    json!({}),
  );

  let shared = output.model.category("Shared").unwrap();
  let names: Vec<&str> = shared.operations.iter().map(|op| op.name.as_str()).collect();
  assert_eq!(names, vec!["CreateA", "ListA"]);

  let default = output.model.category(DEFAULT_CATEGORY).unwrap();
  let names: Vec<&str> = default.operations.iter().map(|op| op.name.as_str()).collect();
  assert_eq!(names, vec!["ListB", "ListC"]);

  let categories: Vec<&str> = output.model.categories().iter().map(|c| c.name.as_str()).collect();
  assert_eq!(categories, vec!["Shared", DEFAULT_CATEGORY]);
}

#[test]
fn test_path_level_parameters_are_shared_and_overridable() {
  let output = build(
    json!({
      "/accounts/{id}": {
        "parameters": [
          { "name": "id", "in": "path", "required": true, "type": "string" },
          { "name": "verbose", "in": "query", "type": "boolean" }
        ],
        "get": {
          "operationId": "GetAccount",
          "parameters": [{ "name": "verbose", "in": "query", "type": "string", "description": "override" }],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let operation = output.model.operation("GetAccount").unwrap();
  let names: Vec<&str> = operation.parameters.iter().map(|p| p.source_name.as_str()).collect();
  assert_eq!(names, vec!["id", "verbose"]);
  assert_eq!(operation.parameters[1].type_ref, TypeRef::string());
  assert_eq!(operation.parameters[1].description.as_deref(), Some("override"));
}

#[test]
fn test_shared_parameter_references() {
  let doc: RawDocument = serde_json::from_value(json!({
    "swagger": "2.0",
    "info": { "title": "Shared", "version": "1" },
    "parameters": {
      "Top": { "name": "$top", "in": "query", "type": "integer", "format": "int32", "default": 10 }
    },
    "paths": {
      "/items": {
        "get": {
          "operationId": "ListItems",
          "parameters": [{ "$ref": "#/parameters/Top" }],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }
  }))
  .unwrap();
  let output = ModelBuilder::new(&doc).build().unwrap();

  let top = &output.model.operation("ListItems").unwrap().parameters[0];
  assert_eq!(top.clean_name, "top");
  assert_eq!(top.example.as_deref(), Some("10"));
}

#[test]
fn test_placeholder_mismatch_rejected() {
  let failure = build_failure(
    json!({
      "/companies/{companyId}": {
        "get": {
          "operationId": "GetCompany",
          "parameters": [{ "name": "id", "in": "path", "required": true, "type": "integer" }],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let messages = error_messages(&failure);
  assert_eq!(messages.len(), 2);
  assert!(messages[0].contains("placeholder '{companyId}' has no path parameter"));
  assert!(messages[1].contains("path parameter 'id' does not appear"));
}

#[test]
fn test_duplicate_parameter_identifiers_rejected() {
  let failure = build_failure(
    json!({
      "/search": {
        "get": {
          "operationId": "Search",
          "parameters": [
            { "name": "$top", "in": "query", "type": "integer" },
            { "name": "top", "in": "query", "type": "integer" }
          ],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let messages = error_messages(&failure);
  assert_eq!(messages.len(), 1);
  assert!(messages[0].contains("parameter identifier 'top' is declared more than once"));
}

#[test]
fn test_colliding_stripped_identifiers_rejected() {
  let failure = build_failure(
    json!({
      "/things": {
        "get": {
          "operationId": "ListThings",
          "parameters": [
            { "name": "address.region", "in": "query", "type": "string" },
            { "name": "region", "in": "query", "type": "string" }
          ],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let messages = error_messages(&failure);
  assert_eq!(messages.len(), 1);
  assert!(messages[0].contains("operation 'ListThings'"));
  assert!(messages[0].contains("parameters 'address.region' and 'region' share the identifier 'region'"));
}

#[test]
fn test_transport_header_does_not_collide_with_call_parameters() {
  let output = build(
    json!({
      "/things": {
        "get": {
          "operationId": "ListThings",
          "parameters": [
            { "name": "X-Avalara-Client", "in": "header", "type": "string" },
            { "name": "client.X-Avalara-Client", "in": "query", "type": "string" }
          ],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let operation = output.model.operation("ListThings").unwrap();
  assert_eq!(operation.call_parameters().len(), 1);
}

#[test]
fn test_duplicate_operation_ids_rejected() {
  let failure = build_failure(
    json!({
      "/a": { "get": { "operationId": "Same", "responses": ok_response(json!({ "type": "string" })) } },
      "/b": { "get": { "operationId": "Same", "responses": ok_response(json!({ "type": "string" })) } }
    }),
    json!({}),
  );

  assert!(error_messages(&failure)[0].contains("operation 'Same'"));
}

#[test]
fn test_unsupported_location_and_missing_body_schema() {
  let failure = build_failure(
    json!({
      "/upload": {
        "post": {
          "operationId": "Upload",
          "parameters": [
            { "name": "session", "in": "cookie", "type": "string" },
            { "name": "payload", "in": "body" }
          ],
          "responses": ok_response(json!({ "type": "string" }))
        }
      }
    }),
    json!({}),
  );

  let messages = error_messages(&failure);
  assert_eq!(messages.len(), 2);
  assert!(messages[0].contains("unsupported parameter location 'cookie'"));
  assert!(messages[1].contains("body parameter declares no schema"));
}

#[test]
fn test_unresolved_references_all_reported() {
  let failure = build_failure(
    json!({
      "/a": {
        "get": {
          "operationId": "GetA",
          "parameters": [{ "$ref": "#/parameters/Missing" }],
          "responses": ok_response(json!({ "$ref": "#/definitions/Nowhere" }))
        }
      }
    }),
    json!({
      "Holder": { "type": "object", "properties": { "x": { "$ref": "#/definitions/Gone" } } }
    }),
  );

  let messages = error_messages(&failure);
  assert_eq!(messages.len(), 3);
  assert!(messages[0].contains("model 'Holder'"));
  assert!(messages.iter().any(|m| m.contains("'#/parameters/Missing'")));
  assert!(messages.iter().any(|m| m.contains("'#/definitions/Nowhere'")));
}

#[test]
fn test_operation_filter() {
  let paths = json!({
    "/a": { "get": { "operationId": "KeepMe", "responses": ok_response(json!({ "type": "string" })) } },
    "/b": { "get": { "operationId": "DropMe", "responses": ok_response(json!({ "type": "string" })) } },
    "/c": { "get": { "operationId": "AlsoDrop", "responses": ok_response(json!({ "type": "string" })) } }
  });

  let only: HashSet<String> = ["KeepMe", "DropMe", "Ghost"].into_iter().map(String::from).collect();
  let excluded: HashSet<String> = ["DropMe"].into_iter().map(String::from).collect();
  let output = build_filtered(paths, json!({}), OperationFilter::new(Some(&only), Some(&excluded)));

  let names: Vec<&str> = output.model.operations().map(|op| op.name.as_str()).collect();
  assert_eq!(names, vec!["KeepMe"]);
  assert_eq!(output.stats.operations_filtered, 2);
  assert_eq!(
    output.stats.warnings,
    vec![GenerationWarning::UnmatchedOperationFilter {
      operation: "Ghost".to_string()
    }]
  );
}

#[test]
fn test_version_fallbacks() {
  let doc: RawDocument = serde_json::from_value(json!({
    "swagger": "2.0",
    "info": { "title": "Versioned", "version": "2.0" },
    "x-avalara-version": "18.12.0-244",
    "paths": {}
  }))
  .unwrap();
  let output = ModelBuilder::new(&doc).build().unwrap();
  assert_eq!(output.model.version().full(), "18.12.0-244");

  let doc: RawDocument =
    serde_json::from_value(json!({ "swagger": "2.0", "info": { "title": "None" }, "paths": {} })).unwrap();
  let output = ModelBuilder::new(&doc).build().unwrap();
  assert_eq!(output.model.version().full(), "0.0.0");
}
