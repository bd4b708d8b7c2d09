pub(crate) const DEFINITION_REF_PREFIX: &str = "#/definitions/";
pub(crate) const PARAMETER_REF_PREFIX: &str = "#/parameters/";

/// Extracts the definition name from a `#/definitions/<Name>` pointer.
///
/// Returns `None` for external references and pointers into other sections. JSON Pointer
/// escapes (`~1`, `~0`) are decoded.
pub fn parse_definition_ref(ref_path: &str) -> Option<String> {
  parse_local_ref(ref_path, DEFINITION_REF_PREFIX)
}

/// Extracts the shared parameter name from a `#/parameters/<Name>` pointer.
pub fn parse_parameter_ref(ref_path: &str) -> Option<String> {
  parse_local_ref(ref_path, PARAMETER_REF_PREFIX)
}

fn parse_local_ref(ref_path: &str, prefix: &str) -> Option<String> {
  let name = ref_path.strip_prefix(prefix)?;
  if name.is_empty() || name.contains('/') {
    return None;
  }
  Some(name.replace("~1", "/").replace("~0", "~"))
}
