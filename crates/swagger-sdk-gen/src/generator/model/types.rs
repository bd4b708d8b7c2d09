use std::fmt;

use strum::Display;

/// A scalar schema type with its optional `format` qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive {
  pub name: String,
  pub format: Option<String>,
}

impl Primitive {
  pub fn new(name: impl Into<String>, format: Option<&str>) -> Self {
    Self {
      name: name.into(),
      format: format.map(|f| f.trim().to_ascii_lowercase()).filter(|f| !f.is_empty()),
    }
  }

  /// Whether targets with nullable value types treat this primitive as a value type.
  pub fn is_value_type(&self) -> bool {
    match self.name.as_str() {
      "integer" | "number" | "boolean" => true,
      "string" => matches!(self.format.as_deref(), Some("date-time" | "date")),
      _ => false,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CollectionKind {
  Array,
  Map,
}

/// A language-neutral type reference.
///
/// Named references hold only the identifier; the target lives in the `ApiModel` and is
/// found by lookup, so recursive object graphs need no special handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
  Primitive(Primitive),
  Collection { element: Box<TypeRef>, kind: CollectionKind },
  Named(String),
}

impl TypeRef {
  pub fn primitive(name: impl Into<String>, format: Option<&str>) -> Self {
    Self::Primitive(Primitive::new(name, format))
  }

  pub fn string() -> Self {
    Self::primitive("string", None)
  }

  pub fn array(element: TypeRef) -> Self {
    Self::Collection {
      element: Box::new(element),
      kind: CollectionKind::Array,
    }
  }

  /// Maps always use string keys, so only the value type is recorded.
  pub fn map(value: TypeRef) -> Self {
    Self::Collection {
      element: Box::new(value),
      kind: CollectionKind::Map,
    }
  }

  pub fn named(name: impl Into<String>) -> Self {
    Self::Named(name.into())
  }

  /// Every named identifier this reference mentions, innermost collections included.
  pub fn named_targets(&self) -> Vec<&str> {
    match self {
      Self::Primitive(_) => vec![],
      Self::Collection { element, .. } => element.named_targets(),
      Self::Named(name) => vec![name.as_str()],
    }
  }
}

impl fmt::Display for TypeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Primitive(Primitive { name, format: None }) => write!(f, "{name}"),
      Self::Primitive(Primitive {
        name,
        format: Some(format),
      }) => write!(f, "{name}({format})"),
      Self::Collection {
        element,
        kind: CollectionKind::Array,
      } => write!(f, "array<{element}>"),
      Self::Collection {
        element,
        kind: CollectionKind::Map,
      } => write!(f, "map<string, {element}>"),
      Self::Named(name) => write!(f, "{name}"),
    }
  }
}

/// What a successful call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseType {
  Typed(TypeRef),
  /// Binary download (`type: file`).
  FileResult,
  /// No successful response schema was declared.
  NoContent,
}

impl ResponseType {
  pub fn type_ref(&self) -> Option<&TypeRef> {
    match self {
      Self::Typed(type_ref) => Some(type_ref),
      Self::FileResult | Self::NoContent => None,
    }
  }
}

impl fmt::Display for ResponseType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Typed(type_ref) => write!(f, "{type_ref}"),
      Self::FileResult => f.write_str("file"),
      Self::NoContent => f.write_str("no content"),
    }
  }
}
