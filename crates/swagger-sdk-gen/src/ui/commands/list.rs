use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use strum::IntoEnumIterator;

use crate::{
  generator::{builder::category_for, document::RawDocument, languages::TargetLanguage},
  naming::operations::operation_identifier,
  ui::{Colors, colors::Role, term_width},
  utils::document::DocumentLoader,
};

/// One row of `list operations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperationRow {
  pub id: String,
  pub verb: String,
  pub path: String,
  pub category: String,
}

pub(crate) fn operation_rows(document: &RawDocument) -> Vec<OperationRow> {
  let mut rows: Vec<OperationRow> = document
    .operations()
    .map(|(path, verb, _, operation)| OperationRow {
      id: operation_identifier(verb.as_str(), path, operation.operation_id.as_deref()),
      verb: verb.as_str().to_uppercase(),
      path: path.to_string(),
      category: category_for(operation),
    })
    .collect();

  rows.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.id.cmp(&b.id)));
  rows
}

fn new_table(colors: &Colors, headers: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(colors.cell(Role::Label)));
  }
  table.set_header(row);
  table
}

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = DocumentLoader::open(input).await?.parse()?;

  let mut table = new_table(colors, &["OPERATION ID", "METHOD", "PATH", "CATEGORY"]);
  for operation in operation_rows(&document) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation.id)
        .fg(colors.cell(Role::Value))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(operation.verb)
        .fg(colors.cell(Role::Accent))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(operation.path).fg(colors.cell(Role::Primary)));
    row.add_cell(Cell::new(operation.category).fg(colors.cell(Role::Info)));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

pub fn list_languages(colors: &Colors) {
  let mut table = new_table(colors, &["LANGUAGE", "NAME", "EXTENSION"]);
  for language in TargetLanguage::iter() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(language.as_str())
        .fg(colors.cell(Role::Value))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(language.display_name()).fg(colors.cell(Role::Primary)));
    row.add_cell(Cell::new(format!(".{}", language.file_extension())).fg(colors.cell(Role::Info)));
    table.add_row(row);
  }

  println!("{table}");
}
