use std::{collections::HashSet, path::PathBuf, sync::Arc};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use itertools::Itertools;

use crate::{
  generator::{
    builder::OperationFilter,
    document::RawDocument,
    languages::TargetLanguage,
    metrics::GenerationStats,
    orchestrator::{Orchestrator, RunReport, render_targets},
    render::{
      builtin::default_target,
      target::{RenderTarget, RenderTask},
    },
  },
  ui::{Colors, GenerateCommand},
  utils::document::DocumentLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// Where render targets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
  Builtin(Vec<TargetLanguage>),
  TaskFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub targets: TargetSource,
  pub verbose: bool,
  pub quiet: bool,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      languages,
      task,
      only,
      exclude,
      verbose,
      quiet,
    } = command;

    let targets = match task {
      Some(path) => TargetSource::TaskFile(path),
      None if languages.is_empty() => anyhow::bail!("At least one target language (-l) or a task file (-t) is required"),
      None => TargetSource::Builtin(languages.into_iter().unique().collect()),
    };

    Ok(Self {
      input,
      output,
      targets,
      verbose,
      quiet,
      only_operations: only.map(|ops| ops.into_iter().collect()),
      excluded_operations: exclude.map(|ops| ops.into_iter().collect()),
    })
  }

  async fn load_document(&self) -> anyhow::Result<RawDocument> {
    Ok(DocumentLoader::open(&self.input).await?.parse()?)
  }

  fn operation_filter(&self) -> OperationFilter {
    OperationFilter::new(self.only_operations.as_ref(), self.excluded_operations.as_ref())
  }

  async fn render_targets(&self) -> anyhow::Result<Vec<RenderTarget>> {
    match &self.targets {
      TargetSource::Builtin(languages) => Ok(
        languages
          .iter()
          .map(|language| default_target(*language, &self.output))
          .collect(),
      ),
      TargetSource::TaskFile(path) => Ok(RenderTask::load(path, &self.output).await?.targets),
    }
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.primary())
      );
    }
  }

  fn detail(&self, message: &str) {
    if self.config.verbose {
      println!("           {}", message.with(self.colors.info()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(&format!("Loading Swagger document from: {}", self.config.input.display()));
  }

  fn log_document(&self, orchestrator: &Orchestrator) {
    let metadata = orchestrator.metadata();
    let title = metadata.title.as_deref().unwrap_or("untitled API");
    let version = metadata.version.as_deref().unwrap_or("unversioned");
    self.detail(&format!("{title} ({version})"));
  }

  fn log_rendering(&self, targets: &[RenderTarget]) {
    self.info(&format!(
      "Rendering {} target(s) into: {}",
      targets.len(),
      self.config.output.display()
    ));
    for target in targets {
      self.detail(&format!(
        "{} [{}] -> {}",
        target.name,
        target.language.display_name(),
        target.root_folder.display()
      ));
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Operations built:", stats.operations_built.to_string());
    if stats.operations_filtered > 0 {
      self.stat("", format!("{} filtered out", stats.operations_filtered));
    }
    self.stat("Categories:", stats.categories_built.to_string());
    self.stat("Models built:", stats.models_built.to_string());
    if stats.fetch_models_built > 0 {
      self.stat("", format!("{} fetch result wrappers", stats.fetch_models_built));
    }
    self.stat(
      "Enums built:",
      format!("{} ({} items)", stats.enums_built, stats.enum_items_built),
    );
    self.stat("Targets rendered:", stats.targets_rendered.to_string());
    if stats.targets_failed > 0 {
      self.stat("Targets failed:", stats.targets_failed.to_string());
    }
    self.stat("Artifacts written:", stats.artifacts_written.to_string());
    if stats.fixups_applied > 0 {
      self.stat("Fixups applied:", stats.fixups_applied.to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Recursive definitions:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !(warning.is_fixup() || self.config.verbose) {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_outcomes(&self, report: &RunReport) {
    for outcome in &report.outcomes {
      let status = match &outcome.result {
        Ok(summary) => format!("{} artifact(s)", summary.artifacts.len()),
        Err(failure) => format!("failed with {} error(s)", failure.errors.len()),
      };
      self.detail(&format!(
        "{} [{}]: {status}",
        outcome.name,
        outcome.language.display_name()
      ));
    }
  }

  fn print_failures(&self, report: &RunReport) {
    for failure in report.failures() {
      eprintln!("{} {}", "Error:".with(self.colors.accent()), failure);
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated SDK sources".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_sdk(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_document().await?;
  let targets = config.render_targets().await?;

  let orchestrator = Orchestrator::new(document).with_filter(config.operation_filter());
  logger.log_document(&orchestrator);
  logger.info("Building API model...");
  let built = orchestrator.build()?;
  let mut stats = built.stats;

  logger.log_rendering(&targets);
  let report = render_targets(Arc::new(built.model), targets).await;
  report.record_into(&mut stats);
  logger.log_outcomes(&report);

  logger.print_statistics(&stats);
  logger.print_failures(&report);

  if !report.is_success() {
    anyhow::bail!(
      "{} of {} target(s) failed",
      stats.targets_failed,
      report.outcomes.len()
    );
  }

  logger.log_success();
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn command(languages: Vec<TargetLanguage>, task: Option<&str>) -> GenerateCommand {
    GenerateCommand {
      input: PathBuf::from("swagger.json"),
      output: PathBuf::from("out"),
      languages,
      task: task.map(PathBuf::from),
      only: Some(vec!["get_widgets".to_string()]),
      exclude: None,
      verbose: false,
      quiet: true,
    }
  }

  #[test]
  fn test_from_command_builtin_languages_deduplicated() {
    let config = GenerateConfig::from_command(command(
      vec![TargetLanguage::CSharp, TargetLanguage::Ruby, TargetLanguage::CSharp],
      None,
    ))
    .unwrap();

    assert_eq!(
      config.targets,
      TargetSource::Builtin(vec![TargetLanguage::CSharp, TargetLanguage::Ruby])
    );
    assert!(config.only_operations.unwrap().contains("get_widgets"));
    assert!(config.excluded_operations.is_none());
  }

  #[test]
  fn test_from_command_task_file() {
    let config = GenerateConfig::from_command(command(vec![], Some("render.json"))).unwrap();
    assert_eq!(config.targets, TargetSource::TaskFile(PathBuf::from("render.json")));
  }

  #[test]
  fn test_from_command_requires_targets() {
    let err = GenerateConfig::from_command(command(vec![], None)).unwrap_err();
    assert!(err.to_string().contains("target language"));
  }
}
