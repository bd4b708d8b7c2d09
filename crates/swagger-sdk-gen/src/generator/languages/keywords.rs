use std::{
  borrow::Cow,
  collections::{BTreeMap, HashSet},
  sync::LazyLock,
};

use strum::{EnumIter, IntoEnumIterator};

use crate::{
  generator::{
    languages::TargetLanguage,
    model::{ApiModel, Parameter},
  },
  naming::identifiers::{IdentifierCase, convert_case, first_lower, first_upper},
};

/// Appended to any identifier that collides with a reserved word.
pub(crate) const KEYWORD_SUFFIX: &str = "Field";

static CSHARP_RESERVED: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class", "const",
    "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event", "explicit", "extern",
    "false", "finally", "fixed", "float", "for", "foreach", "goto", "if", "implicit", "in", "int", "interface",
    "internal", "is", "lock", "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc",
    "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong", "unchecked",
    "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
  ]
  .into_iter()
  .collect()
});

static JAVA_RESERVED: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
    "default", "do", "double", "else", "enum", "extends", "false", "final", "finally", "float", "for", "goto", "if",
    "implements", "import", "instanceof", "int", "interface", "long", "native", "new", "null", "package", "private",
    "protected", "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
  ]
  .into_iter()
  .collect()
});

static PHP_RESERVED: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone", "const", "continue",
    "declare", "default", "do", "echo", "else", "elseif", "empty", "enddeclare", "endfor", "endforeach", "endif",
    "endswitch", "endwhile", "eval", "exit", "extends", "final", "finally", "fn", "for", "foreach", "function",
    "global", "goto", "if", "implements", "include", "instanceof", "insteadof", "interface", "isset", "list",
    "match", "namespace", "new", "or", "print", "private", "protected", "public", "readonly", "require", "return",
    "static", "switch", "throw", "trait", "try", "unset", "use", "var", "while", "xor", "yield",
  ]
  .into_iter()
  .collect()
});

static PYTHON_RESERVED: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "self", "type", "filter", "id",
  ]
  .into_iter()
  .collect()
});

static RUBY_RESERVED: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "BEGIN", "END", "alias", "and", "begin", "break", "case", "class", "def", "defined?", "do", "else", "elsif",
    "end", "ensure", "false", "for", "if", "in", "module", "next", "nil", "not", "or", "redo", "rescue", "retry",
    "return", "self", "super", "then", "true", "undef", "unless", "until", "when", "while", "yield",
  ]
  .into_iter()
  .collect()
});

static JAVASCRIPT_RESERVED: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do", "else",
    "enum", "export", "extends", "false", "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
  ]
  .into_iter()
  .collect()
});

static APEX_RESERVED: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "number", "set", "new", "exception", "currency", "boolean", "string", "blob", "desc", "default", "type", "char",
    "extends", "virtual", "today", "transaction", "search", "retrieve", "class", "const", "decimal", "global",
  ]
  .into_iter()
  .collect()
});

pub fn reserved_words(language: TargetLanguage) -> &'static HashSet<&'static str> {
  match language {
    TargetLanguage::CSharp => &CSHARP_RESERVED,
    TargetLanguage::Java => &JAVA_RESERVED,
    TargetLanguage::Php => &PHP_RESERVED,
    TargetLanguage::Python => &PYTHON_RESERVED,
    TargetLanguage::Ruby => &RUBY_RESERVED,
    TargetLanguage::JavaScript => &JAVASCRIPT_RESERVED,
    TargetLanguage::Apex => &APEX_RESERVED,
  }
}

/// Which spelling of an identifier an override replaces.
///
/// `Clean` and `Stripped` are the canonical identifiers as declared. The case forms are
/// derived from the stripped identifier the same way the template case filters derive
/// them, so a collision is detected in the spelling that is actually emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum NameForm {
  Clean,
  Stripped,
  Snake,
  Camel,
  Pascal,
  Constant,
  FirstLower,
  FirstUpper,
}

impl NameForm {
  /// The identifier spelled in this form, before keyword filtering.
  pub fn emit(self, clean: &str, stripped: &str) -> String {
    let cased = |case| convert_case(stripped, case).unwrap_or_else(|| stripped.to_string());
    match self {
      Self::Clean => clean.to_string(),
      Self::Stripped => stripped.to_string(),
      Self::Snake => cased(IdentifierCase::SnakeCase),
      Self::Camel => cased(IdentifierCase::CamelCase),
      Self::Pascal => cased(IdentifierCase::PascalCase),
      Self::Constant => cased(IdentifierCase::ConstantCase),
      Self::FirstLower => first_lower(stripped),
      Self::FirstUpper => first_upper(stripped),
    }
  }

  /// Re-spells a suffixed identifier in this form's case, so `id` + `Field` stays
  /// `id_field` in snake case.
  fn respell(self, ident: String) -> String {
    let case = match self {
      Self::Snake => IdentifierCase::SnakeCase,
      Self::Camel => IdentifierCase::CamelCase,
      Self::Pascal => IdentifierCase::PascalCase,
      Self::Constant => IdentifierCase::ConstantCase,
      Self::Clean | Self::Stripped | Self::FirstLower | Self::FirstUpper => return ident,
    };
    convert_case(&ident, case).unwrap_or(ident)
  }
}

/// Addresses one spelling of one identifier in the API model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentifierKey {
  Operation {
    operation: String,
    form: NameForm,
  },
  Parameter {
    operation: String,
    parameter: String,
    form: NameForm,
  },
  Property {
    model: String,
    property: String,
    form: NameForm,
  },
  EnumItem {
    enum_name: String,
    item: String,
    form: NameForm,
  },
}

impl IdentifierKey {
  pub fn operation(operation: &str, form: NameForm) -> Self {
    Self::Operation {
      operation: operation.to_string(),
      form,
    }
  }

  pub fn parameter(operation: &str, parameter: &str, form: NameForm) -> Self {
    Self::Parameter {
      operation: operation.to_string(),
      parameter: parameter.to_string(),
      form,
    }
  }

  pub fn property(model: &str, property: &str, form: NameForm) -> Self {
    Self::Property {
      model: model.to_string(),
      property: property.to_string(),
      form,
    }
  }

  pub fn enum_item(enum_name: &str, item: &str, form: NameForm) -> Self {
    Self::EnumItem {
      enum_name: enum_name.to_string(),
      item: item.to_string(),
      form,
    }
  }

  pub fn form(&self) -> NameForm {
    match self {
      Self::Operation { form, .. }
      | Self::Parameter { form, .. }
      | Self::Property { form, .. }
      | Self::EnumItem { form, .. } => *form,
    }
  }
}

/// Sanitized identifiers for one target language, keyed by the entity and spelling they
/// rename.
///
/// Parameters and properties are keyed by source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierOverrides {
  entries: BTreeMap<IdentifierKey, String>,
}

impl IdentifierOverrides {
  fn new() -> Self {
    Self {
      entries: BTreeMap::new(),
    }
  }

  pub fn get(&self, key: &IdentifierKey) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  /// The emitted identifier for `key`: the recorded override, else the identifier spelled
  /// in the key's form.
  pub fn resolve(&self, key: &IdentifierKey, clean: &str, stripped: &str) -> String {
    self
      .get(key)
      .map_or_else(|| key.form().emit(clean, stripped), str::to_string)
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[cfg(test)]
  pub fn iter(&self) -> impl Iterator<Item = (&IdentifierKey, &str)> {
    self.entries.iter().map(|(key, value)| (key, value.as_str()))
  }

  fn record(&mut self, key: IdentifierKey, value: String) {
    self.entries.insert(key, value);
  }
}

/// One identifier of a naming scope: the name its key uses, and its canonical spellings.
struct ScopeMember<'m> {
  key: &'m str,
  clean: &'m str,
  stripped: &'m str,
}

/// Rewrites identifiers that collide with a language's reserved words or with each other.
///
/// Every form is checked as it would be emitted. Matching is case-sensitive and always
/// starts from the canonical identifier, so applying the filter repeatedly yields the
/// same overrides.
#[derive(Debug, Clone, Copy)]
pub struct KeywordFilter {
  reserved: &'static HashSet<&'static str>,
}

impl KeywordFilter {
  pub fn new(language: TargetLanguage) -> Self {
    Self {
      reserved: reserved_words(language),
    }
  }

  pub fn is_reserved(&self, ident: &str) -> bool {
    self.reserved.contains(ident)
  }

  pub fn filter<'a>(&self, ident: &'a str) -> Cow<'a, str> {
    if self.is_reserved(ident) {
      Cow::Owned(format!("{ident}{KEYWORD_SUFFIX}"))
    } else {
      Cow::Borrowed(ident)
    }
  }

  pub fn apply(&self, model: &ApiModel) -> IdentifierOverrides {
    let mut overrides = IdentifierOverrides::new();

    let operations: Vec<ScopeMember> = model
      .operations()
      .map(|operation| ScopeMember {
        key: &operation.name,
        clean: &operation.name,
        stripped: &operation.name,
      })
      .collect();
    self.assign_scope(&operations, |name, form| IdentifierKey::operation(name, form), &mut overrides);

    for operation in model.operations() {
      let parameters = parameter_members(&operation.parameters);
      self.assign_scope(
        &parameters,
        |name, form| IdentifierKey::parameter(&operation.name, name, form),
        &mut overrides,
      );
    }

    for m in model.models() {
      let properties = parameter_members(&m.properties);
      self.assign_scope(
        &properties,
        |name, form| IdentifierKey::property(&m.name, name, form),
        &mut overrides,
      );
    }

    for enum_def in model.enums() {
      let items: Vec<ScopeMember> = enum_def
        .items
        .iter()
        .map(|item| ScopeMember {
          key: &item.name,
          clean: &item.name,
          stripped: &item.name,
        })
        .collect();
      self.assign_scope(
        &items,
        |name, form| IdentifierKey::enum_item(&enum_def.name, name, form),
        &mut overrides,
      );
    }

    overrides
  }

  /// Assigns every form of every identifier in one scope.
  ///
  /// Identifiers that are neither reserved nor already taken keep their spelling, in
  /// declaration order. Reserved ones get the keyword suffix. Anything still taken gets a
  /// counter until the spelling is unique within the scope.
  fn assign_scope(
    &self,
    members: &[ScopeMember<'_>],
    key: impl Fn(&str, NameForm) -> IdentifierKey,
    overrides: &mut IdentifierOverrides,
  ) {
    for form in NameForm::iter() {
      let spelled: Vec<String> = members
        .iter()
        .map(|member| form.emit(member.clean, member.stripped))
        .collect();

      let mut taken = HashSet::new();
      let mut pending = vec![];
      for (index, ident) in spelled.iter().enumerate() {
        if self.is_reserved(ident) || !taken.insert(ident.clone()) {
          pending.push(index);
        }
      }

      for index in pending {
        let base = match self.filter(&spelled[index]) {
          Cow::Owned(suffixed) => form.respell(suffixed),
          Cow::Borrowed(ident) => ident.to_string(),
        };
        let mut candidate = base.clone();
        let mut counter = 2;
        while !taken.insert(candidate.clone()) {
          candidate = format!("{base}{counter}");
          counter += 1;
        }
        overrides.record(key(members[index].key, form), candidate);
      }
    }
  }
}

fn parameter_members(parameters: &[Parameter]) -> Vec<ScopeMember<'_>> {
  parameters
    .iter()
    .map(|param| ScopeMember {
      key: &param.source_name,
      clean: &param.clean_name,
      stripped: &param.stripped_name,
    })
    .collect()
}
