//! Link href sanitization.
//!
//! Hrefs are normalized the way a browser would before picking a scheme:
//! character references are decoded, then percent escapes, and everything
//! except word characters and colons is dropped. What is left must not start
//! with a script-capable protocol.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use super::unescape;
use crate::error::SanitizeError;

/// Protocols refused by [`check_href`], already lowercased.
pub const BLOCKED_PROTOCOLS: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Check whether `href` may be rendered as a link target.
///
/// # Errors
///
/// Returns [`SanitizeError::MalformedEscape`] or
/// [`SanitizeError::InvalidUtf8`] when percent-decoding fails, and
/// [`SanitizeError::BlockedProtocol`] when the normalized href starts with
/// one of [`BLOCKED_PROTOCOLS`].
pub fn check_href(href: &str) -> Result<(), SanitizeError> {
  let entity_decoded = unescape(href);
  let decoded = decode_uri_component(&entity_decoded)?;
  let normalized = normalize_protocol(&decoded);

  match BLOCKED_PROTOCOLS
    .into_iter()
    .find(|protocol| normalized.starts_with(protocol))
  {
    Some(protocol) => Err(SanitizeError::BlockedProtocol(protocol)),
    None => Ok(()),
  }
}

/// Percent-decode a URI component, refusing malformed input.
///
/// A `%` must be followed by two hex digits and the decoded bytes must be
/// UTF-8. Lenient decoders pass such input through untouched, which would let
/// a crafted href skip the protocol check.
///
/// # Errors
///
/// See [`check_href`].
pub fn decode_uri_component(input: &str) -> Result<Cow<'_, str>, SanitizeError> {
  let bytes = input.as_bytes();
  for (idx, _) in input.match_indices('%') {
    let well_formed = bytes
      .get(idx + 1..idx + 3)
      .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
    if !well_formed {
      return Err(SanitizeError::MalformedEscape(idx));
    }
  }

  percent_decode_str(input)
    .decode_utf8()
    .map_err(|_| SanitizeError::InvalidUtf8)
}

/// Keep only `[A-Za-z0-9_:]` and lowercase the result.
fn normalize_protocol(decoded: &str) -> String {
  decoded
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ':')
    .map(|c| c.to_ascii_lowercase())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_urls_allowed() {
    assert_eq!(check_href("https://example.com/a?b=c#d"), Ok(()));
    assert_eq!(check_href("/relative/path"), Ok(()));
    assert_eq!(check_href("#fragment"), Ok(()));
    assert_eq!(check_href("mailto:someone@example.com"), Ok(()));
  }

  #[test]
  fn test_blocked_protocols() {
    assert_eq!(
      check_href("javascript:alert(1)"),
      Err(SanitizeError::BlockedProtocol("javascript:"))
    );
    assert_eq!(
      check_href("VBScript:msgbox(1)"),
      Err(SanitizeError::BlockedProtocol("vbscript:"))
    );
    assert_eq!(
      check_href("data:text/html,<script>"),
      Err(SanitizeError::BlockedProtocol("data:"))
    );
  }

  #[test]
  fn test_obfuscated_protocols() {
    // whitespace and control characters are stripped before the check
    assert!(check_href(" java\tscript:alert(1)").is_err());
    // character references
    assert!(check_href("javascript&#58;alert(1)").is_err());
    assert!(check_href("&#106;avascript:alert(1)").is_err());
    assert!(check_href("javascript&colon;alert(1)").is_err());
  }

  #[test]
  fn test_unterminated_references() {
    assert_eq!(
      check_href("&#106avascript:alert(1)"),
      Err(SanitizeError::BlockedProtocol("javascript:"))
    );
    assert_eq!(
      check_href("javascri&#x70t:alert(1)"),
      Err(SanitizeError::BlockedProtocol("javascript:"))
    );
    assert_eq!(
      check_href("&#100ata:text/html,x"),
      Err(SanitizeError::BlockedProtocol("data:"))
    );
    // hex digits run on, so this is U+06AA and not a `j`
    assert_eq!(check_href("&#x6Aavascript:alert(1)"), Ok(()));
    // percent escapes
    assert!(check_href("javascript%3Aalert(1)").is_err());
    assert!(check_href("%6A%61vascript:alert(1)").is_err());
  }

  #[test]
  fn test_malformed_escapes_refused() {
    assert_eq!(
      check_href("http://example.com/%zz"),
      Err(SanitizeError::MalformedEscape(19))
    );
    assert_eq!(
      check_href("100%"),
      Err(SanitizeError::MalformedEscape(3))
    );
    assert_eq!(check_href("%E0%A4%A"), Err(SanitizeError::MalformedEscape(6)));
  }

  #[test]
  fn test_invalid_utf8_refused() {
    assert_eq!(check_href("%FF"), Err(SanitizeError::InvalidUtf8));
  }

  #[test]
  fn test_decode_uri_component_borrows_when_clean() {
    let decoded =
      decode_uri_component("plain").expect("clean input should decode");
    assert!(matches!(decoded, Cow::Borrowed("plain")));
    assert_eq!(
      decode_uri_component("a%20b").expect("escaped space should decode"),
      "a b"
    );
  }
}
