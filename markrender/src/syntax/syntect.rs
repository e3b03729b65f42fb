//! Syntect-based syntax highlighting backend.
//!
//! Emits `<span class="...">` markup from Sublime Text syntax definitions
//! instead of inline colors, so themes live in a stylesheet and the output
//! stays stable across theme changes.

use std::sync::OnceLock;

use syntect::{
  html::{ClassStyle, ClassedHTMLGenerator},
  parsing::{SyntaxReference, SyntaxSet},
  util::LinesWithEndings,
};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::Highlight,
};

/// Syntect-based syntax highlighter.
#[derive(Debug, Clone, Copy)]
pub struct SyntectHighlighter {
  class_style: ClassStyle,
}

impl SyntectHighlighter {
  /// Create a highlighter emitting classes in the given style.
  #[must_use]
  pub const fn new(class_style: ClassStyle) -> Self {
    Self { class_style }
  }

  /// Get the syntect `SyntaxSet`.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
  }

  /// Look up a syntax by name or file extension, case-insensitively.
  fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    Self::syntax_set().find_syntax_by_token(language)
  }

  /// Check if a language is supported.
  #[must_use]
  pub fn supports_language(&self, language: &str) -> bool {
    !language.is_empty() && Self::find_syntax(language).is_some()
  }

  /// Highlight `code`, reporting why it could not be highlighted.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::UnsupportedLanguage`] for languages syntect does
  /// not know and [`SyntaxError::HighlightingFailed`] when parsing a line
  /// fails.
  pub fn try_highlight(
    &self,
    code: &str,
    language: &str,
  ) -> SyntaxResult<String> {
    let syntax = Self::find_syntax(language)
      .filter(|_| !language.is_empty())
      .ok_or_else(|| SyntaxError::UnsupportedLanguage(language.to_string()))?;

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
      syntax,
      Self::syntax_set(),
      self.class_style,
    );
    for line in LinesWithEndings::from(code) {
      generator
        .parse_html_for_line_which_includes_newline(line)
        .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
    }
    Ok(generator.finalize())
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self::new(ClassStyle::Spaced)
  }
}

impl Highlight for SyntectHighlighter {
  fn highlight(&self, code: &str, lang: &str) -> Option<String> {
    match self.try_highlight(code, lang) {
      Ok(html) => Some(html),
      Err(e) => {
        log::debug!("Leaving code block unhighlighted: {e}");
        None
      },
    }
  }
}
