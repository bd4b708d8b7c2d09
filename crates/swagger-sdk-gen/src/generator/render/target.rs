//! Render task configuration: which templates a target renders, where the output goes,
//! and which fixups run afterwards.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bon::Builder;
use serde::Deserialize;
use strum::Display;

use crate::generator::languages::TargetLanguage;

/// A render task file: a list of independent targets.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderTask {
  pub targets: Vec<RenderTarget>,
}

impl RenderTask {
  /// Reads a JSON task file. Template file paths resolve against the task file's
  /// directory; each target's `root_folder` resolves against `output_root`.
  pub async fn load(path: &Path, output_root: &Path) -> anyhow::Result<Self> {
    let bytes = tokio::fs::read(path)
      .await
      .with_context(|| format!("failed to read render task {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    Self::parse(&bytes, base_dir, output_root).with_context(|| format!("invalid render task {}", path.display()))
  }

  pub fn parse(bytes: &[u8], base_dir: &Path, output_root: &Path) -> anyhow::Result<Self> {
    let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
    let mut task: Self = serde_path_to_error::deserialize(deserializer)
      .map_err(|err| anyhow::anyhow!("at '{}': {}", err.path(), err.inner()))?;

    for target in &mut task.targets {
      target.root_folder = output_root.join(&target.root_folder);
      for template in &mut target.templates {
        if let TemplateSource::File(file) = &mut template.source {
          *file = base_dir.join(&*file);
        }
      }
    }
    Ok(task)
  }
}

#[derive(Debug, Clone, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct RenderTarget {
  #[builder(into)]
  pub name: String,
  pub language: TargetLanguage,
  #[builder(into)]
  pub root_folder: PathBuf,
  #[serde(default)]
  #[builder(default)]
  pub templates: Vec<TemplateTask>,
  #[serde(default)]
  #[builder(default)]
  pub fixups: Vec<FixupTask>,
}

/// Where a template's text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
  /// A template compiled into the generator, such as `csharp/client`.
  Builtin(String),
  File(PathBuf),
}

impl TemplateSource {
  /// The name the template is registered under.
  pub fn template_name(&self) -> String {
    match self {
      Self::Builtin(name) => name.clone(),
      Self::File(path) => path.display().to_string(),
    }
  }
}

/// Which model entities a template is rendered once for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TemplateKind {
  /// Once, for the whole API.
  SingleFile,
  /// Once per category.
  MethodCategories,
  /// Once per operation.
  Methods,
  Models,
  /// Models that are not `FetchResult[...]` wrappers.
  UniqueModels,
  FetchModels,
  Enums,
}

#[derive(Debug, Clone, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct TemplateTask {
  pub source: TemplateSource,
  pub kind: TemplateKind,
  /// Output path relative to the target root, with `{field}` merge patterns.
  #[builder(into)]
  pub output: String,
}

/// A regex replacement applied to an existing file after rendering.
#[derive(Debug, Clone, Deserialize, Builder)]
#[serde(deny_unknown_fields)]
pub struct FixupTask {
  /// File path relative to the target root, with `{field}` merge patterns.
  #[builder(into)]
  pub file: String,
  #[builder(into)]
  pub pattern: String,
  /// Merged with the version fields, then used as a regex replacement (`$1` expands).
  #[builder(into)]
  pub replacement: String,
  #[serde(default)]
  #[builder(default)]
  pub encoding: FileEncoding,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileEncoding {
  #[default]
  Utf8,
  /// Transliterates to ASCII before writing.
  Ascii,
}
