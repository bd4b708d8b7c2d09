use std::collections::HashSet;

/// Restricts which operations are built, by operation identifier.
#[derive(Debug, Clone, Default)]
pub struct OperationFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
}

impl OperationFilter {
  #[must_use]
  pub fn new(only: Option<&HashSet<String>>, excluded: Option<&HashSet<String>>) -> Self {
    Self {
      only: only.cloned(),
      excluded: excluded.cloned(),
    }
  }

  /// An identifier passes if it is in the inclusion set (or there is none) and not in the
  /// exclusion set.
  #[must_use]
  pub fn accepts<S>(&self, operation_id: S) -> bool
  where
    S: AsRef<str>,
  {
    if let Some(ref included) = self.only
      && !included.contains(operation_id.as_ref())
    {
      return false;
    }

    if let Some(ref excluded) = self.excluded
      && excluded.contains(operation_id.as_ref())
    {
      return false;
    }

    true
  }

  /// Filter entries that name no operation in the document, sorted.
  pub(crate) fn unmatched(&self, seen: &HashSet<String>) -> Vec<String> {
    let mut unmatched: Vec<String> = self
      .only
      .iter()
      .chain(self.excluded.iter())
      .flatten()
      .filter(|id| !seen.contains(*id))
      .cloned()
      .collect();
    unmatched.sort();
    unmatched.dedup();
    unmatched
  }
}
