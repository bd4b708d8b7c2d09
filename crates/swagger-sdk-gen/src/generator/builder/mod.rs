//! Turns a raw Swagger document into the language-neutral [`ApiModel`].

mod definitions;
mod enums;
mod filter;
mod operations;
mod responses;
mod types;

#[cfg(test)]
mod tests;

pub use filter::OperationFilter;
pub(crate) use operations::category_for;

use crate::generator::{
  builder::enums::EnumRegistry,
  document::RawDocument,
  errors::{BuildFailure, GeneratorError},
  metrics::{GenerationStats, GenerationWarning},
  model::{ApiModel, ApiVersion, version::FALLBACK_VERSION},
  resolver::ReferenceResolver,
};

/// Shared state while converting definitions and operations.
pub(crate) struct BuildContext<'a> {
  resolver: ReferenceResolver<'a>,
  enums: EnumRegistry,
  warnings: Vec<GenerationWarning>,
}

#[derive(Debug)]
pub struct BuildOutput {
  pub model: ApiModel,
  pub stats: GenerationStats,
}

pub struct ModelBuilder<'a> {
  document: &'a RawDocument,
  filter: OperationFilter,
}

impl<'a> ModelBuilder<'a> {
  pub fn new(document: &'a RawDocument) -> Self {
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

  /// Builds the model, or reports every error found across all definitions and
  /// operations.
  pub fn build(self) -> Result<BuildOutput, BuildFailure> {
    let resolver = ReferenceResolver::new(self.document);
    resolver.validate()?;

    let mut stats = GenerationStats::default();
    stats.record_cycles(resolver.detect_cycles());

    let mut context = BuildContext {
      resolver,
      enums: EnumRegistry::default(),
      warnings: vec![],
    };

    let (models, mut errors) = context.build_models(&self.document.definitions);
    let (categories, operation_errors) = context.build_categories(self.document, &self.filter, &mut stats);
    errors.extend(operation_errors);

    if !errors.is_empty() {
      return Err(BuildFailure { errors });
    }

    let version = ApiVersion::parse(self.document.declared_version().unwrap_or(FALLBACK_VERSION));
    let model = ApiModel::new(version, categories, models, context.enums.into_enums());

    let dangling: Vec<GeneratorError> = model
      .unresolved_references()
      .into_iter()
      .map(|(context, target)| GeneratorError::unresolved(context, target))
      .collect();
    if !dangling.is_empty() {
      return Err(BuildFailure { errors: dangling });
    }

    stats.record_model(&model);
    stats.record_warnings(context.warnings);

    Ok(BuildOutput { model, stats })
  }
}
