pub mod builder;
pub mod document;
pub mod errors;
pub mod languages;
pub mod metrics;
pub mod model;
pub mod orchestrator;
pub mod render;
pub(crate) mod resolver;

#[cfg(test)]
mod tests;
