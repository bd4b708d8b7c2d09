use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

static NUMERIC_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

pub(crate) const FALLBACK_VERSION: &str = "0.0.0";

/// The published API version in the forms templates need.
///
/// ```text
/// full:        19.2.0-258
/// dotted:      19.2.0.258
/// three_part:  19.2.0
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion {
  full: String,
  segments: Vec<String>,
}

impl ApiVersion {
  pub fn parse(raw: &str) -> Self {
    let full = match raw.trim() {
      "" => FALLBACK_VERSION.to_string(),
      trimmed => trimmed.to_string(),
    };
    let segments = NUMERIC_SEGMENT_RE
      .find_iter(&full)
      .map(|m| match m.as_str().trim_start_matches('0') {
        "" => "0".to_string(),
        digits => digits.to_string(),
      })
      .collect();

    Self { full, segments }
  }

  pub fn full(&self) -> &str {
    &self.full
  }

  /// Every numeric segment joined with dots.
  pub fn dotted(&self) -> String {
    if self.segments.is_empty() {
      return FALLBACK_VERSION.to_string();
    }
    self.segments.join(".")
  }

  /// The first three numeric segments, padded with zeros.
  pub fn three_part(&self) -> String {
    self
      .segments
      .iter()
      .map(String::as_str)
      .chain(std::iter::repeat("0"))
      .take(3)
      .join(".")
  }
}

impl Default for ApiVersion {
  fn default() -> Self {
    Self::parse(FALLBACK_VERSION)
  }
}
