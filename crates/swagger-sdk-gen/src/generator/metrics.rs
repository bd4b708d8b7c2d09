use strum::Display;

use crate::generator::model::ApiModel;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub operations_built: usize,
  pub operations_filtered: usize,
  pub models_built: usize,
  pub fetch_models_built: usize,
  pub enums_built: usize,
  pub enum_items_built: usize,
  pub categories_built: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub targets_rendered: usize,
  pub targets_failed: usize,
  pub artifacts_written: usize,
  pub fixups_applied: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  /// Counts the entities of a finished model.
  pub fn record_model(&mut self, model: &ApiModel) {
    self.categories_built = model.categories().len();
    self.operations_built = model.operations().count();
    self.models_built = 0;
    self.fetch_models_built = 0;
    for m in model.models() {
      self.models_built += 1;
      if m.is_fetch_result() {
        self.fetch_models_built += 1;
      }
    }
    self.enums_built = 0;
    self.enum_items_built = 0;
    for e in model.enums() {
      self.enums_built += 1;
      self.enum_items_built += e.items.len();
    }
  }

  pub fn record_filtered_operation(&mut self) {
    self.operations_filtered += 1;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_target_rendered(&mut self, artifacts: usize, fixups: usize) {
    self.targets_rendered += 1;
    self.artifacts_written += artifacts;
    self.fixups_applied += fixups;
  }

  pub fn record_target_failed(&mut self) {
    self.targets_failed += 1;
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "{context}: inline object schema rendered as an untyped object")]
  InlineObjectFlattened { context: String },
  #[strum(to_string = "Enum '{enum_name}' gained values from {context}")]
  EnumValuesMerged { enum_name: String, context: String },
  #[strum(to_string = "[{operation}] no successful response declared, treated as no content")]
  NoSuccessResponse { operation: String },
  #[strum(to_string = "Operation filter '{operation}' matched no operation")]
  UnmatchedOperationFilter { operation: String },
  #[strum(to_string = "[{target}] fixup file not found: {path}")]
  FixupFileNotFound { target: String, path: String },
  #[strum(to_string = "[{target}] fixup pattern matched nothing in {path}")]
  FixupNoMatch { target: String, path: String },
}

impl GenerationWarning {
  pub fn is_fixup(&self) -> bool {
    matches!(self, Self::FixupFileNotFound { .. } | Self::FixupNoMatch { .. })
  }
}
