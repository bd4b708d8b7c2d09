use std::sync::LazyLock;

use regex::Regex;

use crate::naming::identifiers::sanitize;

static URI_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Returns the declared `operationId`, or synthesizes one from the verb and path.
///
/// ```text
/// ("get", "/companies/{id}/locations") => "get_companies_by_id_locations"
/// ```
pub(crate) fn operation_identifier(verb: &str, path: &str, operation_id: Option<&str>) -> String {
  if let Some(id) = operation_id.map(str::trim)
    && !id.is_empty()
  {
    return id.to_string();
  }

  let path_parts = path
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| {
      if segment.starts_with('{') && segment.ends_with('}') {
        "by_id".to_string()
      } else {
        sanitize(segment).to_lowercase()
      }
    })
    .filter(|segment| !segment.is_empty())
    .collect::<Vec<_>>();

  let verb_lower = verb.to_lowercase();
  if path_parts.is_empty() {
    verb_lower
  } else {
    format!("{}_{}", verb_lower, path_parts.join("_"))
  }
}

/// Extracts `{placeholder}` names from a URI template in order of appearance.
pub(crate) fn uri_placeholders(uri: &str) -> Vec<&str> {
  URI_PLACEHOLDER_RE
    .captures_iter(uri)
    .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    .collect()
}
