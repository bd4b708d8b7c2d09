//! Orchestration for the Swagger to SDK generation pipeline.
//!
//! Building is sequential: the raw document is validated, resolved, and converted into
//! an [`ApiModel`], then dropped. Rendering fans out: every target renders concurrently
//! against the same shared model, and one target's failure never stops the others.
//!
//! `ui::commands::generate_sdk` drives both halves: [`Orchestrator::build`] for the model,
//! then [`render_targets`] for every target.

use std::{path::PathBuf, sync::Arc};

use tokio::task::JoinSet;

use crate::generator::{
  builder::{BuildOutput, ModelBuilder, OperationFilter},
  document::RawDocument,
  errors::{BuildFailure, GeneratorError, TargetFailure},
  languages::TargetLanguage,
  metrics::{GenerationStats, GenerationWarning},
  model::ApiModel,
  render::{
    LoadedTemplate, RenderedArtifact, Renderer,
    fixups::{FixupOutcome, apply_fixup},
    target::RenderTarget,
    version_fields,
  },
};

/// Document metadata for log output.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
  pub title: Option<String>,
  pub version: Option<String>,
}

/// Owns the raw document until the model is built.
pub struct Orchestrator {
  document: RawDocument,
  filter: OperationFilter,
}

impl Orchestrator {
  pub fn new(document: RawDocument) -> Self {
    Self {
      document,
      filter: OperationFilter::default(),
    }
  }

  #[must_use]
  pub fn with_filter(mut self, filter: OperationFilter) -> Self {
    self.filter = filter;
    self
  }

  pub fn metadata(&self) -> DocumentMetadata {
    DocumentMetadata {
      title: self.document.info.title.clone(),
      version: self.document.declared_version().map(str::to_string),
    }
  }

  /// Builds the API model. The raw document is dropped afterwards.
  ///
  /// # Errors
  ///
  /// Returns every unresolved reference, inconsistency, or invalid definition found.
  pub fn build(self) -> Result<BuildOutput, BuildFailure> {
    ModelBuilder::new(&self.document).with_filter(self.filter).build()
  }
}

/// What one successful target produced.
#[derive(Debug, Clone)]
pub struct TargetSummary {
  pub artifacts: Vec<PathBuf>,
  pub fixups_applied: usize,
  pub warnings: Vec<GenerationWarning>,
}

#[derive(Debug)]
pub struct TargetOutcome {
  pub name: String,
  pub language: TargetLanguage,
  pub result: Result<TargetSummary, TargetFailure>,
}

/// Per-target outcomes in the order targets were given.
#[derive(Debug, Default)]
pub struct RunReport {
  pub outcomes: Vec<TargetOutcome>,
}

impl RunReport {
  pub fn is_success(&self) -> bool {
    self.outcomes.iter().all(|outcome| outcome.result.is_ok())
  }

  pub fn failures(&self) -> impl Iterator<Item = &TargetFailure> {
    self.outcomes.iter().filter_map(|outcome| outcome.result.as_ref().err())
  }

  pub fn record_into(&self, stats: &mut GenerationStats) {
    for outcome in &self.outcomes {
      match &outcome.result {
        Ok(summary) => {
          stats.record_target_rendered(summary.artifacts.len(), summary.fixups_applied);
          stats.record_warnings(summary.warnings.iter().cloned());
        }
        Err(_) => stats.record_target_failed(),
      }
    }
  }
}

/// Renders every target concurrently and writes its files.
pub async fn render_targets(model: Arc<ApiModel>, targets: Vec<RenderTarget>) -> RunReport {
  let mut slots: Vec<(String, TargetLanguage, Option<Result<TargetSummary, TargetFailure>>)> = targets
    .iter()
    .map(|target| (target.name.clone(), target.language, None))
    .collect();

  let mut tasks = JoinSet::new();
  for (index, target) in targets.into_iter().enumerate() {
    let model = Arc::clone(&model);
    tasks.spawn(async move { (index, render_target(model, target).await) });
  }

  while let Some(joined) = tasks.join_next().await {
    if let Ok((index, result)) = joined {
      slots[index].2 = Some(result);
    }
  }

  let outcomes = slots
    .into_iter()
    .map(|(name, language, result)| {
      let result = result.unwrap_or_else(|| {
        Err(TargetFailure::single(
          &name,
          GeneratorError::TemplateRender {
            target: name.clone(),
            template: String::new(),
            message: "render task terminated unexpectedly".to_string(),
          },
        ))
      });
      TargetOutcome { name, language, result }
    })
    .collect();

  RunReport { outcomes }
}

/// Loads templates, renders on the blocking pool, then writes artifacts and applies fixups.
pub async fn render_target(model: Arc<ApiModel>, target: RenderTarget) -> Result<TargetSummary, TargetFailure> {
  let name = target.name.clone();

  let mut templates = Vec::with_capacity(target.templates.len());
  let mut errors = vec![];
  for task in &target.templates {
    match LoadedTemplate::load(&name, &task.source).await {
      Ok(template) => templates.push(template),
      Err(err) => errors.push(err),
    }
  }
  if !errors.is_empty() {
    return Err(TargetFailure::new(&name, errors));
  }

  let render_model = Arc::clone(&model);
  let render_target = target.clone();
  let artifacts = tokio::task::spawn_blocking(move || {
    Renderer::new(render_target, templates).and_then(|renderer| renderer.render(&render_model))
  })
  .await
  .map_err(|err| {
    TargetFailure::single(
      &name,
      GeneratorError::TemplateRender {
        target: name.clone(),
        template: String::new(),
        message: format!("render task failed: {err}"),
      },
    )
  })??;

  let written = write_artifacts(&artifacts)
    .await
    .map_err(|errors| TargetFailure::new(&name, errors))?;

  let fields = version_fields(model.version(), target.language);
  let mut warnings = vec![];
  let mut fixups_applied = 0;
  for fixup in &target.fixups {
    match apply_fixup(&target, fixup, &fields).await {
      Ok(FixupOutcome::Applied { .. }) => fixups_applied += 1,
      Ok(FixupOutcome::FileNotFound { path }) => warnings.push(GenerationWarning::FixupFileNotFound {
        target: name.clone(),
        path: path.display().to_string(),
      }),
      Ok(FixupOutcome::NoMatch { path }) => warnings.push(GenerationWarning::FixupNoMatch {
        target: name.clone(),
        path: path.display().to_string(),
      }),
      Err(err) => errors.push(err),
    }
  }
  if !errors.is_empty() {
    return Err(TargetFailure::new(&name, errors));
  }

  Ok(TargetSummary {
    artifacts: written,
    fixups_applied,
    warnings,
  })
}

async fn write_artifacts(artifacts: &[RenderedArtifact]) -> Result<Vec<PathBuf>, Vec<GeneratorError>> {
  let mut written = Vec::with_capacity(artifacts.len());
  let mut errors = vec![];

  for artifact in artifacts {
    if let Some(parent) = artifact.path.parent()
      && let Err(err) = tokio::fs::create_dir_all(parent).await
    {
      errors.push(GeneratorError::io(parent, err));
      continue;
    }
    match tokio::fs::write(&artifact.path, &artifact.contents).await {
      Ok(()) => written.push(artifact.path.clone()),
      Err(err) => errors.push(GeneratorError::io(&artifact.path, err)),
    }
  }

  if errors.is_empty() { Ok(written) } else { Err(errors) }
}
