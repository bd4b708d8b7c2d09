use crate::{
  generator::{
    errors::GeneratorError,
    languages::TargetLanguage,
    model::{ApiModel, CollectionKind, NamedKind, Parameter, Primitive, ResponseType, TypeRef, fetch_result_inner},
  },
  naming::identifiers::type_identifier,
};

type PrimitiveEntry = (&'static str, Option<&'static str>, &'static str);

/// One language's type vocabulary. Collection and generic patterns substitute
/// `{element}` and `{inner}`.
struct TypeTable {
  primitives: &'static [PrimitiveEntry],
  array: &'static str,
  map: &'static str,
  generic: &'static str,
  file_result: &'static str,
  no_content: &'static str,
  nullable_suffix: Option<&'static str>,
}

const CSHARP: TypeTable = TypeTable {
  primitives: &[
    ("integer", None, "Int32"),
    ("integer", Some("byte"), "Byte"),
    ("integer", Some("int8"), "SByte"),
    ("integer", Some("int16"), "Int16"),
    ("integer", Some("int32"), "Int32"),
    ("integer", Some("int64"), "Int64"),
    ("number", None, "Decimal"),
    ("number", Some("decimal"), "Decimal"),
    ("number", Some("float"), "Single"),
    ("number", Some("double"), "Double"),
    ("boolean", None, "Boolean"),
    ("string", None, "String"),
    ("string", Some("date-time"), "DateTime"),
    ("string", Some("date"), "DateTime"),
    ("string", Some("byte"), "Byte[]"),
    ("string", Some("binary"), "Byte[]"),
    ("string", Some("password"), "String"),
    ("string", Some("email"), "String"),
    ("string", Some("uri"), "String"),
    ("string", Some("uuid"), "String"),
    ("file", None, "Byte[]"),
    ("object", None, "Object"),
  ],
  array: "List<{element}>",
  map: "Dictionary<string, {element}>",
  generic: "FetchResult<{inner}>",
  file_result: "FileResult",
  no_content: "void",
  nullable_suffix: Some("?"),
};

const JAVA: TypeTable = TypeTable {
  primitives: &[
    ("integer", None, "Integer"),
    ("integer", Some("byte"), "Byte"),
    ("integer", Some("int8"), "Byte"),
    ("integer", Some("int16"), "Short"),
    ("integer", Some("int32"), "Integer"),
    ("integer", Some("int64"), "Long"),
    ("number", None, "BigDecimal"),
    ("number", Some("decimal"), "BigDecimal"),
    ("number", Some("float"), "Float"),
    ("number", Some("double"), "Double"),
    ("boolean", None, "Boolean"),
    ("string", None, "String"),
    ("string", Some("date-time"), "Date"),
    ("string", Some("date"), "Date"),
    ("string", Some("byte"), "byte[]"),
    ("string", Some("binary"), "byte[]"),
    ("string", Some("password"), "String"),
    ("string", Some("email"), "String"),
    ("string", Some("uri"), "String"),
    ("string", Some("uuid"), "String"),
    ("file", None, "byte[]"),
    ("object", None, "Object"),
  ],
  array: "ArrayList<{element}>",
  map: "HashMap<String, {element}>",
  generic: "FetchResult<{inner}>",
  file_result: "FileResult",
  no_content: "void",
  nullable_suffix: None,
};

const PHP: TypeTable = TypeTable {
  primitives: &[
    ("integer", None, "int"),
    ("integer", Some("byte"), "int"),
    ("integer", Some("int8"), "int"),
    ("integer", Some("int16"), "int"),
    ("integer", Some("int32"), "int"),
    ("integer", Some("int64"), "int"),
    ("number", None, "float"),
    ("number", Some("decimal"), "float"),
    ("number", Some("float"), "float"),
    ("number", Some("double"), "float"),
    ("boolean", None, "boolean"),
    ("string", None, "string"),
    ("string", Some("date-time"), "string"),
    ("string", Some("date"), "string"),
    ("string", Some("byte"), "string"),
    ("string", Some("binary"), "string"),
    ("string", Some("password"), "string"),
    ("string", Some("email"), "string"),
    ("string", Some("uri"), "string"),
    ("string", Some("uuid"), "string"),
    ("file", None, "string"),
    ("object", None, "object"),
  ],
  array: "{element}[]",
  map: "object",
  generic: "FetchResult",
  file_result: "string",
  no_content: "void",
  nullable_suffix: None,
};

const PYTHON: TypeTable = TypeTable {
  primitives: &[
    ("integer", None, "int"),
    ("integer", Some("byte"), "int"),
    ("integer", Some("int8"), "int"),
    ("integer", Some("int16"), "int"),
    ("integer", Some("int32"), "int"),
    ("integer", Some("int64"), "int"),
    ("number", None, "decimal"),
    ("number", Some("decimal"), "decimal"),
    ("number", Some("float"), "float"),
    ("number", Some("double"), "float"),
    ("boolean", None, "bool"),
    ("string", None, "str"),
    ("string", Some("date-time"), "datetime"),
    ("string", Some("date"), "datetime"),
    ("string", Some("byte"), "bytes"),
    ("string", Some("binary"), "bytes"),
    ("string", Some("password"), "str"),
    ("string", Some("email"), "str"),
    ("string", Some("uri"), "str"),
    ("string", Some("uuid"), "str"),
    ("file", None, "bytes"),
    ("object", None, "object"),
  ],
  array: "list[{element}]",
  map: "dict[str, {element}]",
  generic: "FetchResult[{inner}]",
  file_result: "bytes",
  no_content: "None",
  nullable_suffix: None,
};

const RUBY: TypeTable = TypeTable {
  primitives: &[
    ("integer", None, "Integer"),
    ("integer", Some("byte"), "Integer"),
    ("integer", Some("int8"), "Integer"),
    ("integer", Some("int16"), "Integer"),
    ("integer", Some("int32"), "Integer"),
    ("integer", Some("int64"), "Integer"),
    ("number", None, "BigDecimal"),
    ("number", Some("decimal"), "BigDecimal"),
    ("number", Some("float"), "Float"),
    ("number", Some("double"), "Float"),
    ("boolean", None, "Boolean"),
    ("string", None, "String"),
    ("string", Some("date-time"), "DateTime"),
    ("string", Some("date"), "Date"),
    ("string", Some("byte"), "String"),
    ("string", Some("binary"), "String"),
    ("string", Some("password"), "String"),
    ("string", Some("email"), "String"),
    ("string", Some("uri"), "String"),
    ("string", Some("uuid"), "String"),
    ("file", None, "String"),
    ("object", None, "Object"),
  ],
  array: "{element}[]",
  map: "Hash",
  generic: "FetchResult",
  file_result: "String",
  no_content: "nil",
  nullable_suffix: None,
};

const JAVASCRIPT: TypeTable = TypeTable {
  primitives: &[
    ("integer", None, "number"),
    ("integer", Some("byte"), "number"),
    ("integer", Some("int8"), "number"),
    ("integer", Some("int16"), "number"),
    ("integer", Some("int32"), "number"),
    ("integer", Some("int64"), "number"),
    ("number", None, "number"),
    ("number", Some("decimal"), "number"),
    ("number", Some("float"), "number"),
    ("number", Some("double"), "number"),
    ("boolean", None, "boolean"),
    ("string", None, "string"),
    ("string", Some("date-time"), "Date"),
    ("string", Some("date"), "Date"),
    ("string", Some("byte"), "string"),
    ("string", Some("binary"), "string"),
    ("string", Some("password"), "string"),
    ("string", Some("email"), "string"),
    ("string", Some("uri"), "string"),
    ("string", Some("uuid"), "string"),
    ("file", None, "object"),
    ("object", None, "object"),
  ],
  array: "{element}[]",
  map: "object",
  generic: "FetchResult<{inner}>",
  file_result: "object",
  no_content: "void",
  nullable_suffix: None,
};

const APEX: TypeTable = TypeTable {
  primitives: &[
    ("integer", None, "Integer"),
    ("integer", Some("byte"), "Integer"),
    ("integer", Some("int8"), "Integer"),
    ("integer", Some("int16"), "Integer"),
    ("integer", Some("int32"), "Integer"),
    ("integer", Some("int64"), "Long"),
    ("number", None, "Decimal"),
    ("number", Some("decimal"), "Decimal"),
    ("number", Some("float"), "Double"),
    ("number", Some("double"), "Double"),
    ("boolean", None, "Boolean"),
    ("string", None, "String"),
    ("string", Some("date-time"), "Datetime"),
    ("string", Some("date"), "Date"),
    ("string", Some("byte"), "Blob"),
    ("string", Some("binary"), "Blob"),
    ("string", Some("password"), "String"),
    ("string", Some("email"), "String"),
    ("string", Some("uri"), "String"),
    ("string", Some("uuid"), "String"),
    ("file", None, "Blob"),
    ("object", None, "Object"),
  ],
  array: "List<{element}>",
  map: "Map<String, {element}>",
  generic: "FetchResult{inner}",
  file_result: "Blob",
  no_content: "void",
  nullable_suffix: None,
};

/// Maps language-neutral type references to one target language's type syntax.
#[derive(Clone, Copy)]
pub struct TypeMapper {
  language: TargetLanguage,
  table: &'static TypeTable,
}

impl std::fmt::Debug for TypeMapper {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TypeMapper").field("language", &self.language).finish()
  }
}

impl TypeMapper {
  pub fn for_language(language: TargetLanguage) -> Self {
    let table = match language {
      TargetLanguage::CSharp => &CSHARP,
      TargetLanguage::Java => &JAVA,
      TargetLanguage::Php => &PHP,
      TargetLanguage::Python => &PYTHON,
      TargetLanguage::Ruby => &RUBY,
      TargetLanguage::JavaScript => &JAVASCRIPT,
      TargetLanguage::Apex => &APEX,
    };
    Self { language, table }
  }

  pub fn language(&self) -> TargetLanguage {
    self.language
  }

  /// Fails with `UnmappedType` for any `(name, format)` pair the language has no entry for.
  pub fn map(&self, type_ref: &TypeRef, context: &str) -> Result<String, GeneratorError> {
    match type_ref {
      TypeRef::Primitive(primitive) => self.map_primitive(primitive, context),
      TypeRef::Collection { element, kind } => {
        let element = self.map(element, context)?;
        let pattern = match kind {
          CollectionKind::Array => self.table.array,
          CollectionKind::Map => self.table.map,
        };
        Ok(pattern.replace("{element}", &element))
      }
      TypeRef::Named(name) => Ok(self.map_named(name)),
    }
  }

  pub fn map_response(&self, response: &ResponseType, context: &str) -> Result<String, GeneratorError> {
    match response {
      ResponseType::Typed(type_ref) => self.map(type_ref, context),
      ResponseType::FileResult => Ok(self.table.file_result.to_string()),
      ResponseType::NoContent => Ok(self.table.no_content.to_string()),
    }
  }

  /// Maps a parameter or property, marking optional value types nullable where the
  /// language distinguishes them.
  pub fn map_parameter(&self, parameter: &Parameter, model: &ApiModel, context: &str) -> Result<String, GeneratorError> {
    let mapped = self.map(&parameter.type_ref, context)?;
    match self.table.nullable_suffix {
      Some(suffix) if !parameter.required && is_value_type(&parameter.type_ref, model) => Ok(format!("{mapped}{suffix}")),
      _ => Ok(mapped),
    }
  }

  /// Type names follow each language's PascalCase convention; fetch-result wrappers use the
  /// language's generic form.
  pub fn map_named(&self, name: &str) -> String {
    match fetch_result_inner(name) {
      Some(inner) => self.table.generic.replace("{inner}", &type_identifier(inner)),
      None => type_identifier(name),
    }
  }

  fn map_primitive(&self, primitive: &Primitive, context: &str) -> Result<String, GeneratorError> {
    self
      .table
      .primitives
      .iter()
      .find(|(name, format, _)| *name == primitive.name && *format == primitive.format.as_deref())
      .map(|(_, _, mapped)| (*mapped).to_string())
      .ok_or_else(|| GeneratorError::UnmappedType {
        language: self.language,
        context: context.to_string(),
        type_name: TypeRef::Primitive(primitive.clone()).to_string(),
      })
  }
}

fn is_value_type(type_ref: &TypeRef, model: &ApiModel) -> bool {
  match type_ref {
    TypeRef::Primitive(primitive) => primitive.is_value_type(),
    TypeRef::Named(name) => model.named_kind(name) == Some(NamedKind::Enum),
    TypeRef::Collection { .. } => false,
  }
}
