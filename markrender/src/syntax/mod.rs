//! Syntax highlighting for code blocks.
//!
//! The renderer only knows the [`Highlight`] trait, so any backend (or a
//! plain closure) can be plugged into
//! [`RenderOptions::highlight`](crate::RenderOptions::highlight).
//! Currently bundled backends:
//! - **Syntect** (feature `syntect`) - class-based HTML from Sublime Text
//!   syntax definitions, styled by a client-side stylesheet

pub mod error;
pub mod types;

pub use error::{SyntaxError, SyntaxResult};
pub use types::Highlight;

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use syntect::*;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_closure_is_highlighter() {
    let tag_lang = |code: &str, lang: &str| Some(format!("[{lang}]{code}"));
    assert_eq!(tag_lang.highlight("x", "rs"), Some("[rs]x".to_string()));
  }

  #[test]
  fn test_closure_can_decline() {
    let never = |_: &str, _: &str| -> Option<String> { None };
    assert_eq!(never.highlight("x", "rs"), None);
  }

  #[test]
  fn test_boxed_trait_object() {
    let boxed: Box<dyn Highlight> =
      Box::new(|code: &str, _: &str| Some(code.len().to_string()));
    assert_eq!(boxed.highlight("four", ""), Some("4".to_string()));
  }

  #[test]
  fn test_error_messages() {
    let error = SyntaxError::UnsupportedLanguage("brainfuck".to_string());
    assert_eq!(
      error.to_string(),
      "Language 'brainfuck' is not supported by this highlighter"
    );

    let result: SyntaxResult<String> =
      Err(SyntaxError::HighlightingFailed("boom".to_string()));
    assert!(result.is_err());
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_highlight_rust() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("fn main() {}", "rust")
      .expect("rust should be supported");
    assert!(html.contains("<span class="));
    assert!(html.contains("main"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_escapes_markup() {
    let highlighter = SyntectHighlighter::default();
    let html = highlighter
      .highlight("<div>&</div>\n", "html")
      .expect("html should be supported");
    assert!(!html.contains("<div>"));
    assert!(html.contains("&lt;"));
  }

  #[cfg(feature = "syntect")]
  #[test]
  fn test_syntect_declines_unknown_language() {
    let highlighter = SyntectHighlighter::default();
    assert_eq!(highlighter.highlight("code", "no-such-language"), None);
    assert_eq!(highlighter.highlight("code", ""), None);
  }
}
