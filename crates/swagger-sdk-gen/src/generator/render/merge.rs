use std::{collections::BTreeMap, sync::LazyLock};

use regex::{Captures, Regex};

use crate::naming::identifiers::{IdentifierCase, convert_case};

static MERGE_FIELD_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)((?:\.[a-z_]+)*)\}").unwrap());

/// Values available to `{field}` patterns in output paths and fixups.
pub type MergeFields = BTreeMap<&'static str, String>;

/// Substitutes `{field}` and `{field.modifier...}` occurrences.
///
/// Modifiers apply left to right: `lower`, `upper`, `trim`, `snake`, `camel`, `pascal`,
/// `kebab`. Unknown fields and modifiers are errors.
pub(crate) fn merge_fields(pattern: &str, fields: &MergeFields) -> Result<String, String> {
  let mut failure = None;

  let merged = MERGE_FIELD_RE.replace_all(pattern, |caps: &Captures<'_>| {
    let field = &caps[1];
    let Some(value) = fields.get(field) else {
      failure.get_or_insert_with(|| format!("unknown merge field '{field}' in '{pattern}'"));
      return String::new();
    };

    let modifiers = caps.get(2).map_or("", |m| m.as_str());
    modifiers
      .split('.')
      .filter(|modifier| !modifier.is_empty())
      .try_fold(value.clone(), |acc, modifier| apply_modifier(&acc, modifier))
      .unwrap_or_else(|message| {
        failure.get_or_insert(message);
        String::new()
      })
  });

  match failure {
    Some(message) => Err(message),
    None => Ok(merged.into_owned()),
  }
}

fn apply_modifier(value: &str, modifier: &str) -> Result<String, String> {
  let case = match modifier {
    "lower" => return Ok(value.to_lowercase()),
    "upper" => return Ok(value.to_uppercase()),
    "trim" => return Ok(value.trim().to_string()),
    "snake" => IdentifierCase::SnakeCase,
    "camel" => IdentifierCase::CamelCase,
    "pascal" => IdentifierCase::PascalCase,
    "kebab" => IdentifierCase::KebabCase,
    other => return Err(format!("unknown merge modifier '{other}'")),
  };
  convert_case(value, case).ok_or_else(|| format!("cannot apply '{modifier}' to empty value '{value}'"))
}
