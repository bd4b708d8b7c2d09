use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::{
  generator::{
    languages::TargetLanguage,
    metrics::{GenerationStats, GenerationWarning},
    orchestrator::{Orchestrator, render_targets},
    render::{
      builtin::default_target,
      target::{FixupTask, RenderTarget, TemplateKind, TemplateSource, TemplateTask},
    },
  },
  utils::document::{DocumentFormat, parse_document},
};

const WIDGETS: &str = include_str!("../../../fixtures/widgets.json");
const TAX_SERVICE: &str = include_str!("../../../fixtures/tax_service.json");

fn orchestrator(source: &str) -> Orchestrator {
  Orchestrator::new(parse_document(source.as_bytes(), DocumentFormat::Json).unwrap())
}

#[test]
fn test_metadata() {
  let metadata = orchestrator(TAX_SERVICE).metadata();
  assert_eq!(metadata.title.as_deref(), Some("Tax Service"));
  assert_eq!(metadata.version.as_deref(), Some("18.12.0-244"));
}

#[tokio::test]
async fn test_render_targets_writes_every_language() {
  let dir = tempfile::tempdir().unwrap();
  let model = Arc::new(orchestrator(TAX_SERVICE).build().unwrap().model);
  let targets = TargetLanguage::iter()
    .map(|language| default_target(language, dir.path()))
    .collect();

  let report = render_targets(model, targets).await;
  assert!(report.is_success(), "{:?}", report.failures().collect::<Vec<_>>());

  let names: Vec<&str> = report.outcomes.iter().map(|outcome| outcome.name.as_str()).collect();
  assert_eq!(names, vec!["csharp", "java", "php", "python", "ruby", "javascript", "apex"]);

  for outcome in &report.outcomes {
    let summary = outcome.result.as_ref().unwrap();
    assert!(!summary.artifacts.is_empty());
    for path in &summary.artifacts {
      assert!(path.starts_with(dir.path().join(outcome.language.as_str())));
      assert!(path.is_file(), "{} was not written", path.display());
    }
  }
  assert!(dir.path().join("csharp/models/TransactionModel.cs").is_file());
  assert!(dir.path().join("ruby/lib/client/utilities.rb").is_file());
}

#[tokio::test]
async fn test_failing_target_does_not_block_others() {
  let dir = tempfile::tempdir().unwrap();
  let model = Arc::new(orchestrator(WIDGETS).build().unwrap().model);

  let broken = RenderTarget::builder()
    .name("broken")
    .language(TargetLanguage::Java)
    .root_folder(dir.path().join("broken"))
    .templates(vec![
      TemplateTask::builder()
        .source(TemplateSource::File(dir.path().join("missing.tera")))
        .kind(TemplateKind::SingleFile)
        .output("Client.java")
        .build(),
    ])
    .build();
  let targets = vec![broken, default_target(TargetLanguage::Python, dir.path())];

  let report = render_targets(model, targets).await;
  assert!(!report.is_success());
  assert_eq!(report.failures().count(), 1);
  assert_eq!(report.failures().next().unwrap().target, "broken");
  assert!(report.outcomes[1].result.is_ok());
  assert!(dir.path().join("python/client_methods.py").is_file());
  assert!(!dir.path().join("broken").exists());

  let mut stats = GenerationStats::default();
  report.record_into(&mut stats);
  assert_eq!(stats.targets_rendered, 1);
  assert_eq!(stats.targets_failed, 1);
  assert_eq!(stats.artifacts_written, 2);
}

#[tokio::test]
async fn test_file_templates_and_fixups() {
  let dir = tempfile::tempdir().unwrap();
  let template = dir.path().join("version.tera");
  std::fs::write(&template, "VERSION = \"0.0.0\"\n# {{ api.operations | length }} operation(s)\n").unwrap();
  let model = Arc::new(orchestrator(WIDGETS).build().unwrap().model);

  let target = RenderTarget::builder()
    .name("versioned")
    .language(TargetLanguage::Ruby)
    .root_folder(dir.path().join("gem"))
    .templates(vec![
      TemplateTask::builder()
        .source(TemplateSource::File(template))
        .kind(TemplateKind::SingleFile)
        .output("lib/{language}/version.rb")
        .build(),
    ])
    .fixups(vec![
      FixupTask::builder()
        .file("lib/ruby/version.rb")
        .pattern(r#"VERSION = "[^"]*""#)
        .replacement(r#"VERSION = "{version}""#)
        .build(),
      FixupTask::builder()
        .file("lib/ruby/missing.rb")
        .pattern("x")
        .replacement("y")
        .build(),
    ])
    .build();

  let report = render_targets(model, vec![target]).await;
  let summary = report.outcomes[0].result.as_ref().unwrap();
  assert_eq!(summary.fixups_applied, 1);
  assert!(matches!(
    &summary.warnings[..],
    [GenerationWarning::FixupFileNotFound { target, .. }] if target == "versioned"
  ));

  let written = std::fs::read_to_string(dir.path().join("gem/lib/ruby/version.rb")).unwrap();
  assert_eq!(written, "VERSION = \"1.2.0\"\n# 1 operation(s)\n");
}

#[test]
fn test_build_is_repeatable() {
  let first = orchestrator(TAX_SERVICE).build().unwrap();
  let second = orchestrator(TAX_SERVICE).build().unwrap();
  assert_eq!(first.model, second.model);
  assert_eq!(first.stats, second.stats);
}

#[test]
fn test_metadata_falls_back_to_info_version() {
  let metadata = orchestrator(WIDGETS).metadata();
  assert_eq!(metadata.title.as_deref(), Some("Widget API"));
  assert_eq!(metadata.version.as_deref(), Some("1.2.0"));
}
