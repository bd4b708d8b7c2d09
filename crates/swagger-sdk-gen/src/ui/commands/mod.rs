pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, generate_sdk};
pub use list::{list_languages, list_operations};
