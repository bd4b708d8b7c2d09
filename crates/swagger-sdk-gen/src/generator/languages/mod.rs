pub mod keywords;
pub mod type_map;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

pub use keywords::{IdentifierKey, IdentifierOverrides, KeywordFilter, NameForm};
pub use type_map::TypeMapper;

/// SDK languages with built-in type tables, reserved words, and templates.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
  Serialize,
  Deserialize,
  clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
  #[value(name = "csharp")]
  CSharp,
  Java,
  Php,
  Python,
  Ruby,
  #[value(name = "javascript")]
  JavaScript,
  Apex,
}

impl TargetLanguage {
  pub fn as_str(self) -> &'static str {
    self.into()
  }

  pub fn display_name(self) -> &'static str {
    match self {
      Self::CSharp => "C#",
      Self::Java => "Java",
      Self::Php => "PHP",
      Self::Python => "Python",
      Self::Ruby => "Ruby",
      Self::JavaScript => "JavaScript",
      Self::Apex => "Apex",
    }
  }

  pub fn file_extension(self) -> &'static str {
    match self {
      Self::CSharp => "cs",
      Self::Java => "java",
      Self::Php => "php",
      Self::Python => "py",
      Self::Ruby => "rb",
      Self::JavaScript => "js",
      Self::Apex => "cls",
    }
  }

  pub fn comment_style(self) -> CommentStyle {
    match self {
      Self::CSharp => CommentStyle::XmlDoc,
      Self::Java | Self::Php | Self::JavaScript | Self::Apex => CommentStyle::Block,
      Self::Ruby => CommentStyle::Hash,
      Self::Python => CommentStyle::Docstring,
    }
  }
}

/// How free text is laid out as a documentation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
  /// `/// text`, with XML entities escaped.
  XmlDoc,
  /// ` * text`, for the body of a `/** ... */` block.
  Block,
  /// `# text`
  Hash,
  /// Plain indented lines inside a docstring.
  Docstring,
}

impl CommentStyle {
  pub fn line_prefix(self) -> &'static str {
    match self {
      Self::XmlDoc => "/// ",
      Self::Block => " * ",
      Self::Hash => "# ",
      Self::Docstring => "",
    }
  }

  pub fn escape(self, line: &str) -> String {
    match self {
      Self::XmlDoc => line.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;"),
      Self::Block => line.replace("*/", "*&#47;"),
      Self::Docstring => line.replace("\"\"\"", "\\\"\\\"\\\""),
      Self::Hash => line.to_string(),
    }
  }
}
