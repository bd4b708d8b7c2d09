use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

use crate::generator::languages::TargetLanguage;

/// Failures raised while reading, building, or rendering an API model.
#[derive(Debug, Error)]
pub enum GeneratorError {
  #[error("malformed document at '{path}': {message}")]
  MalformedDocument { path: String, message: String },

  #[error("{context}: unresolved reference to '{target}'")]
  UnresolvedReference { context: String, target: String },

  #[error("{context}: {message}")]
  InconsistentDocument { context: String, message: String },

  #[error("{context}: type '{type_name}' has no {language} mapping")]
  UnmappedType {
    language: TargetLanguage,
    context: String,
    type_name: String,
  },

  #[error("target '{target}', template '{template}': {message}")]
  TemplateRender {
    target: String,
    template: String,
    message: String,
  },

  #[error("{}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl GeneratorError {
  pub(crate) fn unresolved(context: impl Into<String>, target: impl Into<String>) -> Self {
    Self::UnresolvedReference {
      context: context.into(),
      target: target.into(),
    }
  }

  pub(crate) fn inconsistent(context: impl Into<String>, message: impl Into<String>) -> Self {
    Self::InconsistentDocument {
      context: context.into(),
      message: message.into(),
    }
  }

  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}

/// Every error collected while building the API model. Any entry aborts the run.
#[derive(Debug, Error)]
#[error("failed to build API model ({} error(s)):\n{}", .errors.len(), bullet_list(.errors))]
pub struct BuildFailure {
  pub errors: Vec<GeneratorError>,
}

impl BuildFailure {
  pub(crate) fn single(error: GeneratorError) -> Self {
    Self { errors: vec![error] }
  }
}

impl From<GeneratorError> for BuildFailure {
  fn from(error: GeneratorError) -> Self {
    Self::single(error)
  }
}

/// Every error collected for a single render target. Other targets are unaffected.
#[derive(Debug, Error)]
#[error("target '{target}' failed ({} error(s)):\n{}", .errors.len(), bullet_list(.errors))]
pub struct TargetFailure {
  pub target: String,
  pub errors: Vec<GeneratorError>,
}

impl TargetFailure {
  pub(crate) fn new(target: impl Into<String>, errors: Vec<GeneratorError>) -> Self {
    Self {
      target: target.into(),
      errors,
    }
  }

  pub(crate) fn single(target: impl Into<String>, error: GeneratorError) -> Self {
    Self::new(target, vec![error])
  }
}

fn bullet_list(errors: &[GeneratorError]) -> String {
  errors.iter().map(|error| format!("  - {error}")).join("\n")
}
