use std::sync::LazyLock;

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

// Characters that survive into a clean identifier. Dots carry package qualification and
// hyphens appear in wire-level header names, so both are kept.
static ILLEGAL_IDENTIFIER_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]+").unwrap());
static INVALID_SYMBOL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Naming conventions that templates can convert identifiers into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum IdentifierCase {
  SnakeCase,
  CamelCase,
  PascalCase,
  ConstantCase,
  KebabCase,
}

/// Removes marker characters (such as `$`) and anything else that cannot appear in an
/// identifier. Dots and hyphens are preserved.
pub(crate) fn clean_identifier(name: &str) -> String {
  ILLEGAL_IDENTIFIER_CHARS_RE.replace_all(name, "").into_owned()
}

/// Returns the last segment of a package-qualified identifier (`a.b.c` -> `c`).
pub(crate) fn stripped_identifier(clean: &str) -> &str {
  clean.rsplit_once('.').map_or(clean, |(_, last)| last)
}

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses
/// consecutive underscores, and trims any leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_SYMBOL_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts a declared schema name into a type name usable in every target language.
pub(crate) fn type_identifier(name: &str) -> String {
  any_ascii(name)
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
    .collect()
}

/// Derives an enum member name from a raw enum value.
///
/// String values are sanitized; a leading digit gets an underscore prefix. Numeric values
/// become `Value<n>` (`ValueNegative<n>` for negatives).
pub(crate) fn enum_item_identifier(value: &serde_json::Value) -> String {
  match value {
    serde_json::Value::String(text) => {
      let mut ident = sanitize(text);
      if ident.is_empty() {
        return "Unnamed".to_string();
      }
      if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
      }
      ident
    }
    serde_json::Value::Number(number) => {
      let literal = number.to_string();
      match literal.strip_prefix('-') {
        Some(magnitude) => format!("ValueNegative{}", sanitize(magnitude)),
        None => format!("Value{}", sanitize(&literal)),
      }
    }
    serde_json::Value::Bool(flag) => flag.to_string().to_pascal_case(),
    _ => "Unnamed".to_string(),
  }
}

/// Builds the enum type name used when a property declares inline values without naming
/// the enumeration.
pub(crate) fn synthesized_enum_name(owner: &str, property: &str) -> String {
  format!("{}{}", sanitize(owner).to_pascal_case(), sanitize(property).to_pascal_case())
}

/// Converts an identifier into the requested naming convention.
///
/// Returns `None` when the identifier contains no usable characters.
pub(crate) fn convert_case(ident: &str, case: IdentifierCase) -> Option<String> {
  let base = sanitize(ident);
  if base.is_empty() {
    return None;
  }

  let converted = match case {
    IdentifierCase::SnakeCase => base.to_snake_case(),
    IdentifierCase::CamelCase => base.to_camel_case(),
    IdentifierCase::PascalCase => base.to_pascal_case(),
    IdentifierCase::ConstantCase => base.to_constant_case(),
    IdentifierCase::KebabCase => base.to_kebab_case(),
  };
  Some(converted)
}

pub(crate) fn first_upper(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}

pub(crate) fn first_lower(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
  }
}
