//! Heading anchor allocation.
//!
//! Ids come from the slug of a heading's raw text. A raw text seen `k` times
//! before gets the suffix `-k`, so the first "Usage" heading is `usage`, the
//! second `usage-1`, the third `usage-2`. Duplicates are counted on the raw
//! text, not on the slug.
//!
//! Two different raw texts can still land on the same id ("Foo" and "foo!",
//! or a literal "usage 1" heading next to a repeated "Usage"). When that
//! happens the suffix keeps counting up until the id is unused, so ids within
//! one document are always unique.

use std::collections::HashSet;

/// Per-document record of rendered headings.
#[derive(Debug, Clone, Default)]
pub struct HeadingHistory {
  raw:    Vec<String>,
  issued: HashSet<String>,
}

impl HeadingHistory {
  /// Create an empty history.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of headings recorded so far.
  #[must_use]
  pub fn len(&self) -> usize {
    self.raw.len()
  }

  /// Whether no heading has been recorded yet.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.raw.is_empty()
  }

  /// Raw heading texts in document order.
  #[must_use]
  pub fn raw_texts(&self) -> &[String] {
    &self.raw
  }

  /// How many earlier headings had exactly this raw text.
  #[must_use]
  pub fn occurrences(&self, raw: &str) -> usize {
    self.raw.iter().filter(|seen| *seen == raw).count()
  }

  /// Allocate the slug for the next heading and record it.
  ///
  /// `base` is the slugified form of `raw`. The returned slug does not
  /// include any configured header prefix.
  pub fn allocate(&mut self, raw: &str, base: &str) -> String {
    let count = self.occurrences(raw);
    let mut slug = if count > 0 {
      format!("{base}-{count}")
    } else {
      base.to_string()
    };

    if self.issued.contains(&slug) {
      let mut suffix = count + 1;
      loop {
        let candidate = format!("{base}-{suffix}");
        if !self.issued.contains(&candidate) {
          log::debug!(
            "Heading id '{slug}' already taken, using '{candidate}' instead"
          );
          slug = candidate;
          break;
        }
        suffix += 1;
      }
    }

    self.raw.push(raw.to_string());
    self.issued.insert(slug.clone());
    slug
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::slugify;

  fn allocate_all(texts: &[&str]) -> Vec<String> {
    let mut history = HeadingHistory::new();
    texts
      .iter()
      .map(|raw| history.allocate(raw, &slugify(raw)))
      .collect()
  }

  #[test]
  fn test_first_occurrence_unsuffixed() {
    assert_eq!(allocate_all(&["Intro", "Usage"]), vec!["intro", "usage"]);
  }

  #[test]
  fn test_repeats_count_up() {
    assert_eq!(
      allocate_all(&["Usage", "Other", "Usage", "Usage"]),
      vec!["usage", "other", "usage-1", "usage-2"]
    );
  }

  #[test]
  fn test_count_uses_raw_text() {
    // Same slug, different raw text: not a repeat, but still kept unique.
    assert_eq!(
      allocate_all(&["Foo", "foo", "Foo"]),
      vec!["foo", "foo-1", "foo-2"]
    );
  }

  #[test]
  fn test_literal_suffix_collision() {
    assert_eq!(
      allocate_all(&["a", "a 1", "a"]),
      vec!["a", "a-1", "a-2"]
    );
    assert_eq!(
      allocate_all(&["a-1", "a", "a"]),
      vec!["a-1", "a", "a-2"]
    );
  }

  #[test]
  fn test_literal_suffix_after_repeat_is_bumped() {
    // "a-1" is a first occurrence, but its plain slug was already issued to
    // the repeated "a", so it gets a suffix of its own.
    assert_eq!(
      allocate_all(&["a", "a", "a-1"]),
      vec!["a", "a-1", "a-1-1"]
    );
    assert_eq!(
      allocate_all(&["a", "a", "a-1", "a-1"]),
      vec!["a", "a-1", "a-1-1", "a-1-2"]
    );
  }

  #[test]
  fn test_empty_headings() {
    assert_eq!(allocate_all(&["", "", "!"]), vec!["", "-1", "-2"]);
  }

  #[test]
  fn test_history_grows_monotonically() {
    let mut history = HeadingHistory::new();
    assert!(history.is_empty());
    history.allocate("x", "x");
    history.allocate("x", "x");
    assert_eq!(history.len(), 2);
    assert_eq!(history.occurrences("x"), 2);
    assert_eq!(history.raw_texts(), ["x".to_string(), "x".to_string()]);
  }

  #[test]
  fn test_ids_pairwise_distinct() {
    let texts = [
      "A", "a", "A", "a-1", "a 2", "A", "", "", "b", "B!", "b", "a-1",
    ];
    let ids = allocate_all(&texts);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate ids in {ids:?}");
  }
}
