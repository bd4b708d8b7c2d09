pub mod document;
pub mod refs;

pub(crate) use refs::{parse_definition_ref, parse_parameter_ref};
