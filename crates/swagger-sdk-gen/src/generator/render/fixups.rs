use std::path::PathBuf;

use any_ascii::any_ascii;
use regex::Regex;

use crate::generator::{
  errors::GeneratorError,
  render::{
    merge::{MergeFields, merge_fields},
    target::{FileEncoding, FixupTask, RenderTarget},
  },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixupOutcome {
  Applied { path: PathBuf, replacements: usize },
  FileNotFound { path: PathBuf },
  NoMatch { path: PathBuf },
}

/// Rewrites an existing file under the target root. A missing file is reported, not
/// treated as a failure.
pub(crate) async fn apply_fixup(
  target: &RenderTarget,
  fixup: &FixupTask,
  fields: &MergeFields,
) -> Result<FixupOutcome, GeneratorError> {
  let config_error = |message: String| GeneratorError::TemplateRender {
    target: target.name.clone(),
    template: format!("fixup {}", fixup.file),
    message,
  };

  let relative = merge_fields(&fixup.file, fields).map_err(config_error)?;
  let replacement = merge_fields(&fixup.replacement, fields).map_err(config_error)?;
  let pattern = Regex::new(&fixup.pattern).map_err(|err| config_error(err.to_string()))?;
  let path = target.root_folder.join(relative);

  if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
    return Ok(FixupOutcome::FileNotFound { path });
  }

  let original = tokio::fs::read_to_string(&path)
    .await
    .map_err(|err| GeneratorError::io(&path, err))?;
  let replacements = pattern.find_iter(&original).count();
  if replacements == 0 {
    return Ok(FixupOutcome::NoMatch { path });
  }

  let rewritten = pattern.replace_all(&original, replacement.as_str());
  let contents = match fixup.encoding {
    FileEncoding::Utf8 => rewritten.into_owned(),
    FileEncoding::Ascii => any_ascii(&rewritten),
  };
  tokio::fs::write(&path, contents)
    .await
    .map_err(|err| GeneratorError::io(&path, err))?;

  Ok(FixupOutcome::Applied { path, replacements })
}
