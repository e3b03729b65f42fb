//! Escaping, slugs and other small helpers shared by the renderer.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

pub mod codeblock;
pub mod url;

/// HTML-escape `text`.
///
/// With `attribute` set, the output is also safe inside a double-quoted
/// attribute value (`&`, `<`, `>` and `"` are encoded). Otherwise only `&`,
/// `<` and `>` are encoded.
#[must_use]
pub fn escape(text: &str, attribute: bool) -> Cow<'_, str> {
  if attribute {
    html_escape::encode_double_quoted_attribute(text)
  } else {
    html_escape::encode_text(text)
  }
}

static CHAR_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)&(#\d+|#x[0-9a-f]+|\w+);?").unwrap_or_else(|e| {
    log::error!(
      "Failed to compile CHAR_REF_RE regex: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
});

/// Decode character references in `text` the way a browser reads an href.
///
/// The trailing `;` is optional, so `&#106avascript:` decodes like
/// `&#106;avascript:`. Numeric references decode to their code point (invalid
/// ones to U+FFFD), `&colon` to `:`, and other named references through
/// `html_escape`. Unknown names decode to nothing.
///
/// Only used to normalize hrefs before protocol checks.
#[must_use]
pub fn unescape(text: &str) -> Cow<'_, str> {
  CHAR_REF_RE.replace_all(text, |caps: &Captures<'_>| {
    decode_reference(caps.get(1).map_or("", |m| m.as_str()))
  })
}

fn decode_reference(reference: &str) -> String {
  let lower = reference.to_ascii_lowercase();
  if let Some(hex) = lower.strip_prefix("#x") {
    return decode_code_point(u32::from_str_radix(hex, 16).ok());
  }
  if let Some(decimal) = lower.strip_prefix('#') {
    return decode_code_point(decimal.parse().ok());
  }
  if lower == "colon" {
    return ":".to_string();
  }

  let named = format!("&{reference};");
  let decoded = html_escape::decode_html_entities(&named);
  if decoded == named {
    String::new()
  } else {
    decoded.into_owned()
  }
}

fn decode_code_point(code_point: Option<u32>) -> String {
  code_point
    .and_then(char::from_u32)
    .filter(|&c| c != '\0')
    .unwrap_or(char::REPLACEMENT_CHARACTER)
    .to_string()
}

/// Slugify heading text for use as an anchor ID.
///
/// Lowercases and drops punctuation (ASCII punctuation other than `-` and
/// `_`, plus the Unicode general and supplemental punctuation blocks). Every
/// run of whitespace, dots and dashes becomes a single `-`, and dashes at
/// either end are trimmed, so `"a  b"` and `"a - b"` both become `"a-b"` and
/// `"v1.2"` becomes `"v1-2"`.
#[must_use]
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  for c in text.trim().to_lowercase().chars() {
    if c.is_whitespace() || c == '.' || c == '-' {
      if !slug.ends_with('-') {
        slug.push('-');
      }
    } else if !is_slug_punctuation(c) {
      slug.push(c);
    }
  }
  slug.trim_matches('-').to_string()
}

const fn is_slug_punctuation(c: char) -> bool {
  match c {
    '-' | '_' => false,
    '\u{2000}'..='\u{206F}' | '\u{2E00}'..='\u{2E7F}' => true,
    _ => c.is_ascii_punctuation(),
  }
}

/// Create a regex that never matches anything.
///
/// Used as the fallback when a static pattern fails to compile, so a bad
/// pattern disables a feature instead of panicking mid-render.
#[must_use]
pub fn never_matching_regex() -> regex::Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  regex::Regex::new(r"[^\s\S]")
    .expect("regex pattern [^\\s\\S] should always compile")
}
