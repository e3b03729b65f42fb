//! Types for the markrender public API.
use serde::{Deserialize, Serialize};

/// A heading rendered into the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
  /// Raw heading text, before inline rendering.
  pub text:  String,
  /// Heading level (1-6).
  pub level: u8,
  /// Anchor id, including the configured header prefix.
  pub id:    String,
}

/// Result of rendering a whole document through [`crate::events`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedDocument {
  /// Rendered HTML output.
  pub html: String,

  /// Headings in document order (for `ToC`, navigation, etc).
  pub headers: Vec<Header>,

  /// Raw text of the first level-1 heading, if any.
  pub title: Option<String>,
}

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
  Left,
  Center,
  Right,
}

impl Alignment {
  /// The CSS `text-align` value.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Left => "left",
      Self::Center => "center",
      Self::Right => "right",
    }
  }
}

/// Structural metadata for a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlags {
  /// Render as `<th>` instead of `<td>`.
  pub header: bool,
  /// Column alignment, if the table declares one.
  pub align:  Option<Alignment>,
}
