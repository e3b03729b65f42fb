//! The highlighter collaborator trait.

/// A syntax highlighter the renderer can delegate code block text to.
///
/// Implementations return HTML that is already escaped. Returning `None`, or
/// the input unchanged, means the code was not handled and the renderer
/// escapes it itself.
///
/// Any `Fn(&str, &str) -> Option<String>` closure is a highlighter:
///
/// ```
/// use markrender::syntax::Highlight;
///
/// let upper = |code: &str, _lang: &str| Some(code.to_uppercase());
/// assert_eq!(upper.highlight("let x", "js"), Some("LET X".to_string()));
/// ```
pub trait Highlight: Send + Sync {
  /// Highlight `code` written in `lang`.
  ///
  /// `lang` is empty when the code block has no language.
  fn highlight(&self, code: &str, lang: &str) -> Option<String>;
}

impl<F> Highlight for F
where
  F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
  fn highlight(&self, code: &str, lang: &str) -> Option<String> {
    self(code, lang)
  }
}
