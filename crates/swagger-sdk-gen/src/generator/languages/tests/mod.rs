
use crate::{
  generator::{builder::ModelBuilder, model::ApiModel},
  utils::document::{DocumentFormat, parse_document},
};

pub(super) fn fixture_model(source: &str) -> ApiModel {
  let document = parse_document(source.as_bytes(), DocumentFormat::Json).unwrap();
  ModelBuilder::new(&document).build().unwrap().model
}
