use crate::generator::{
  builder::{BuildContext, types::SchemaOwner},
  document::RawOperation,
  errors::GeneratorError,
  metrics::GenerationWarning,
  model::ResponseType,
};

/// Status codes consulted for the successful response, in priority order.
pub(crate) const SUCCESS_STATUS_CODES: &[&str] = &["200", "201", "202", "204"];

impl BuildContext<'_> {
  pub(crate) fn resolve_response(
    &mut self,
    operation: &RawOperation,
    operation_name: &str,
  ) -> Result<ResponseType, GeneratorError> {
    let Some((status, response)) = SUCCESS_STATUS_CODES
      .iter()
      .find_map(|code| operation.responses.get_key_value(*code))
    else {
      self.warnings.push(GenerationWarning::NoSuccessResponse {
        operation: operation_name.to_string(),
      });
      return Ok(ResponseType::NoContent);
    };

    let Some(schema) = &response.schema else {
      return Ok(ResponseType::NoContent);
    };

    if schema.reference.is_none() && schema.schema_type.as_deref() == Some("file") {
      return Ok(ResponseType::FileResult);
    }

    let context = format!("operation '{operation_name}' response '{status}'");
    let type_ref = self.type_ref(schema, SchemaOwner::new(operation_name, "Result"), &context)?;
    Ok(ResponseType::Typed(type_ref))
  }
}
