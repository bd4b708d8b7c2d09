//! Template filters shared by every language.

use std::collections::HashMap;

use tera::{Tera, Value};

use crate::{
  generator::languages::{CommentStyle, TargetLanguage},
  naming::identifiers::{IdentifierCase, convert_case, first_lower, first_upper},
};

/// Lays out free text as one comment line per source line, each prefixed with `indent`
/// spaces and the style's marker. Blank lines keep the marker with no trailing space.
pub(crate) fn format_comment(text: &str, style: CommentStyle, indent: usize) -> String {
  let padding = " ".repeat(indent);
  let prefix = style.line_prefix();

  text
    .trim()
    .lines()
    .map(|line| {
      let line = style.escape(line.trim_end());
      if line.is_empty() {
        format!("{padding}{}", prefix.trim_end())
      } else {
        format!("{padding}{prefix}{line}")
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// `get` -> `Get`, `DELETE` -> `Delete`.
pub(crate) fn verb_literal(verb: &str) -> String {
  first_upper(&verb.to_lowercase())
}

/// Drops the last `count` characters.
pub(crate) fn backtrack(text: &str, count: usize) -> String {
  let keep = text.chars().count().saturating_sub(count);
  text.chars().take(keep).collect()
}

pub(crate) fn register_filters(tera: &mut Tera, language: TargetLanguage) {
  let style = language.comment_style();
  tera.register_filter("comment", move |value: &Value, args: &HashMap<String, Value>| {
    let text = string_arg("comment", value)?;
    let indent = usize_arg(args, "indent")?.unwrap_or(0);
    Ok(Value::String(format_comment(text, style, indent)))
  });

  tera.register_filter("snake_case", case_filter("snake_case", IdentifierCase::SnakeCase));
  tera.register_filter("camel_case", case_filter("camel_case", IdentifierCase::CamelCase));
  tera.register_filter("pascal_case", case_filter("pascal_case", IdentifierCase::PascalCase));
  tera.register_filter("constant_case", case_filter("constant_case", IdentifierCase::ConstantCase));

  tera.register_filter("first_upper", |value: &Value, _: &HashMap<String, Value>| {
    Ok(Value::String(first_upper(string_arg("first_upper", value)?)))
  });
  tera.register_filter("first_lower", |value: &Value, _: &HashMap<String, Value>| {
    Ok(Value::String(first_lower(string_arg("first_lower", value)?)))
  });
  tera.register_filter("verb", |value: &Value, _: &HashMap<String, Value>| {
    Ok(Value::String(verb_literal(string_arg("verb", value)?)))
  });
  tera.register_filter("backtrack", |value: &Value, args: &HashMap<String, Value>| {
    let text = string_arg("backtrack", value)?;
    let count = usize_arg(args, "count")?.unwrap_or(1);
    Ok(Value::String(backtrack(text, count)))
  });
}

fn case_filter(
  name: &'static str,
  case: IdentifierCase,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static {
  move |value: &Value, _: &HashMap<String, Value>| {
    let ident = string_arg(name, value)?;
    convert_case(ident, case)
      .map(Value::String)
      .ok_or_else(|| tera::Error::msg(format!("filter `{name}` received an empty identifier '{ident}'")))
  }
}

fn string_arg<'v>(filter: &str, value: &'v Value) -> tera::Result<&'v str> {
  value
    .as_str()
    .ok_or_else(|| tera::Error::msg(format!("filter `{filter}` expects a string, got {value}")))
}

fn usize_arg(args: &HashMap<String, Value>, name: &str) -> tera::Result<Option<usize>> {
  match args.get(name) {
    None => Ok(None),
    Some(value) => value
      .as_u64()
      .and_then(|n| usize::try_from(n).ok())
      .map(Some)
      .ok_or_else(|| tera::Error::msg(format!("argument `{name}` must be a non-negative integer, got {value}"))),
  }
}
