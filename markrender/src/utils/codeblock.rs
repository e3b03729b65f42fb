use std::sync::LazyLock;

use regex::Regex;

static LINE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\{([\d,-]+)\}").unwrap_or_else(|e| {
    log::error!(
      "Failed to compile LINE_RANGE_RE regex: {e}\n Falling back to never \
       matching regex."
    );
    super::never_matching_regex()
  })
});

/// A code block language tag split into its effective language and an
/// optional line-highlight range.
///
/// `js{3,5-7}` splits into language `js` and range `3,5-7` when line ranges
/// are honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageTag<'a> {
  lang:       Option<&'a str>,
  line_range: Option<&'a str>,
}

impl<'a> LanguageTag<'a> {
  /// Parse a language tag.
  ///
  /// With `line_ranges` unset the tag is taken verbatim. An empty language
  /// (for example a bare `{1-3}` tag) is reported as no language at all.
  #[must_use]
  pub fn parse(tag: Option<&'a str>, line_ranges: bool) -> Self {
    let Some(tag) = tag else {
      return Self::default();
    };

    let mut lang = tag;
    let mut line_range = None;

    if line_ranges && let Some(caps) = LINE_RANGE_RE.captures(tag) {
      line_range = caps.get(1).map(|m| m.as_str());
      log::trace!("Extracted line range {line_range:?} from code tag {tag:?}");
      // The language ends at the first brace, even when it is not the one
      // that matched.
      if let Some(brace) = tag.find('{') {
        lang = &tag[..brace];
      }
    }

    Self {
      lang: (!lang.is_empty()).then_some(lang),
      line_range,
    }
  }

  /// The effective language, if any remains.
  #[must_use]
  pub const fn lang(&self) -> Option<&'a str> {
    self.lang
  }

  /// The extracted `data-line` value, if any.
  #[must_use]
  pub const fn line_range(&self) -> Option<&'a str> {
    self.line_range
  }
}

/// Extract the language word from a fenced code block info string.
///
/// The info string is everything after the opening fence; only its first
/// whitespace-separated word names the language.
#[must_use]
pub fn fence_language(info: &str) -> Option<&str> {
  info.split_whitespace().next()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_plain_language() {
    let tag = LanguageTag::parse(Some("rust"), true);
    assert_eq!(tag.lang(), Some("rust"));
    assert_eq!(tag.line_range(), None);
  }

  #[test]
  fn test_parse_line_range() {
    let tag = LanguageTag::parse(Some("js{3,5-7}"), true);
    assert_eq!(tag.lang(), Some("js"));
    assert_eq!(tag.line_range(), Some("3,5-7"));
  }

  #[test]
  fn test_parse_line_range_disabled() {
    let tag = LanguageTag::parse(Some("js{3,5-7}"), false);
    assert_eq!(tag.lang(), Some("js{3,5-7}"));
    assert_eq!(tag.line_range(), None);
  }

  #[test]
  fn test_parse_non_numeric_braces_untouched() {
    let tag = LanguageTag::parse(Some("js{title}"), true);
    assert_eq!(tag.lang(), Some("js{title}"));
    assert_eq!(tag.line_range(), None);
  }

  #[test]
  fn test_parse_bare_range_has_no_language() {
    let tag = LanguageTag::parse(Some("{1-3}"), true);
    assert_eq!(tag.lang(), None);
    assert_eq!(tag.line_range(), Some("1-3"));
  }

  #[test]
  fn test_parse_empty_and_missing() {
    assert_eq!(LanguageTag::parse(Some(""), true).lang(), None);
    assert_eq!(LanguageTag::parse(None, true), LanguageTag::default());
  }

  #[test]
  fn test_fence_language() {
    assert_eq!(fence_language("rust ignore"), Some("rust"));
    assert_eq!(fence_language("  js{1}  "), Some("js{1}"));
    assert_eq!(fence_language(""), None);
  }
}
