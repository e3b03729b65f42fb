//! Render configuration.
//!
//! [`RenderOptions`] is a plain value object: every render method reads the
//! option it cares about and nothing ever writes to it during a render. All
//! fields are optional, so a missing option simply disables its feature.
//!
//! # Examples
//!
//! ```
//! use markrender::{LinkTarget, RenderOptions};
//!
//! let options = RenderOptions {
//!   xhtml: true,
//!   sanitize: true,
//!   links_in_new_tab: LinkTarget::NewTab,
//!   ..Default::default()
//! };
//! assert_eq!(options.lang_prefix, "language-");
//! ```
//!
//! Options can also be loaded from TOML or JSON:
//!
//! ```
//! use markrender::RenderOptions;
//!
//! let options = RenderOptions::from_toml_str(
//!   r#"
//!   header_prefix = "doc-"
//!   data_line = true
//!   links_in_new_tab = true
//!   "#,
//! )
//! .expect("valid TOML");
//! assert_eq!(options.header_prefix, "doc-");
//! ```

use std::{fmt, fs, path::Path, sync::Arc};

use serde::{Deserialize, Deserializer};

use crate::{error::ConfigError, syntax::Highlight, utils};

/// A slug function turning raw heading text into a URL-safe fragment.
///
/// Must be deterministic: identical input always yields identical output.
pub type Slugifier = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Predicate deciding whether a link opens in a new tab.
pub type LinkPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Whether rendered links get `target="_blank"`.
#[derive(Clone, Default)]
pub enum LinkTarget {
  /// Never add a target attribute.
  #[default]
  SameTab,
  /// Always open links in a new tab.
  NewTab,
  /// Ask the predicate for every href.
  Predicate(LinkPredicate),
}

impl LinkTarget {
  /// Build a [`LinkTarget::Predicate`] from a closure.
  pub fn predicate<F>(f: F) -> Self
  where
    F: Fn(&str) -> bool + Send + Sync + 'static,
  {
    Self::Predicate(Arc::new(f))
  }

  /// Decide whether `href` opens in a new tab.
  #[must_use]
  pub fn opens_new_tab(&self, href: &str) -> bool {
    match self {
      Self::SameTab => false,
      Self::NewTab => true,
      Self::Predicate(predicate) => predicate(href),
    }
  }
}

impl From<bool> for LinkTarget {
  fn from(new_tab: bool) -> Self {
    if new_tab { Self::NewTab } else { Self::SameTab }
  }
}

impl fmt::Debug for LinkTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::SameTab => f.write_str("SameTab"),
      Self::NewTab => f.write_str("NewTab"),
      Self::Predicate(_) => f.write_str("Predicate(..)"),
    }
  }
}

// Config files can only express the boolean form.
impl<'de> Deserialize<'de> for LinkTarget {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    bool::deserialize(deserializer).map(Self::from)
  }
}

fn default_slugifier() -> Slugifier {
  Arc::new(utils::slugify)
}

/// Options for configuring the renderer.
#[derive(Clone, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with independent boolean flags"
)]
pub struct RenderOptions {
  /// CSS class prefix for code block languages, e.g. `language-`.
  pub lang_prefix: String,

  /// Prefix prepended to every generated heading id.
  pub header_prefix: String,

  /// Emit self-closing void elements (`<hr/>`, `<br/>`, `<img .../>`).
  pub xhtml: bool,

  /// Refuse links whose href resolves to a script-capable protocol.
  pub sanitize: bool,

  /// Turn a `{1,3-5}` suffix on code block languages into a `data-line`
  /// attribute.
  pub data_line: bool,

  /// Tag inline code spans with the `markup` language class.
  pub code_span_highlighted: bool,

  /// Whether links open in a new tab.
  pub links_in_new_tab: LinkTarget,

  /// Optional syntax highlighter for code blocks.
  #[serde(skip)]
  pub highlight: Option<Arc<dyn Highlight>>,

  /// Slug function for heading anchors.
  #[serde(skip, default = "default_slugifier")]
  pub slugifier: Slugifier,
}

impl RenderOptions {
  /// Parse options from a TOML document.
  ///
  /// # Errors
  ///
  /// Returns an error if the TOML is invalid or has mistyped fields.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(content)?)
  }

  /// Parse options from a JSON document.
  ///
  /// # Errors
  ///
  /// Returns an error if the JSON is invalid or has mistyped fields.
  pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Load options from a `.toml` or `.json` file.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Io`] if the file cannot be read, and
  /// [`ConfigError::Config`] if it cannot be parsed or its format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).inspect_err(|e| {
      log::warn!("Failed to read options file {}: {e}", path.display());
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("toml") => {
        Self::from_toml_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML options from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some("json") => {
        Self::from_json_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON options from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some(other) => {
        log::warn!("Unsupported options file format: .{other}");
        Err(ConfigError::Config(format!(
          "Unsupported options file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Options file has no extension: {}",
          path.display()
        )))
      },
    }
  }
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      lang_prefix:           "language-".to_string(),
      header_prefix:         String::new(),
      xhtml:                 false,
      sanitize:              false,
      data_line:             false,
      code_span_highlighted: false,
      links_in_new_tab:      LinkTarget::SameTab,
      highlight:             None,
      slugifier:             default_slugifier(),
    }
  }
}

impl fmt::Debug for RenderOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RenderOptions")
      .field("lang_prefix", &self.lang_prefix)
      .field("header_prefix", &self.header_prefix)
      .field("xhtml", &self.xhtml)
      .field("sanitize", &self.sanitize)
      .field("data_line", &self.data_line)
      .field("code_span_highlighted", &self.code_span_highlighted)
      .field("links_in_new_tab", &self.links_in_new_tab)
      .field("highlight", &self.highlight.is_some())
      .finish_non_exhaustive()
  }
}

/// Builder for constructing `RenderOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct RenderOptionsBuilder {
  options: RenderOptions,
}

impl RenderOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the code language class prefix.
  #[must_use]
  pub fn lang_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
    self.options.lang_prefix = prefix.into();
    self
  }

  /// Set the heading id prefix.
  #[must_use]
  pub fn header_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
    self.options.header_prefix = prefix.into();
    self
  }

  /// Enable or disable XHTML void elements.
  #[must_use]
  pub const fn xhtml(mut self, enabled: bool) -> Self {
    self.options.xhtml = enabled;
    self
  }

  /// Enable or disable link sanitization.
  #[must_use]
  pub const fn sanitize(mut self, enabled: bool) -> Self {
    self.options.sanitize = enabled;
    self
  }

  /// Enable or disable `data-line` extraction.
  #[must_use]
  pub const fn data_line(mut self, enabled: bool) -> Self {
    self.options.data_line = enabled;
    self
  }

  /// Enable or disable the language class on inline code.
  #[must_use]
  pub const fn code_span_highlighted(mut self, enabled: bool) -> Self {
    self.options.code_span_highlighted = enabled;
    self
  }

  /// Set the new-tab policy for links.
  #[must_use]
  pub fn links_in_new_tab<T: Into<LinkTarget>>(mut self, target: T) -> Self {
    self.options.links_in_new_tab = target.into();
    self
  }

  /// Open links in a new tab when `predicate` returns true for the href.
  #[must_use]
  pub fn links_in_new_tab_when<F>(mut self, predicate: F) -> Self
  where
    F: Fn(&str) -> bool + Send + Sync + 'static,
  {
    self.options.links_in_new_tab = LinkTarget::predicate(predicate);
    self
  }

  /// Set the code block highlighter.
  #[must_use]
  pub fn highlight<H: Highlight + 'static>(mut self, highlighter: H) -> Self {
    self.options.highlight = Some(Arc::new(highlighter));
    self
  }

  /// Replace the heading slug function.
  #[must_use]
  pub fn slugifier<F>(mut self, slugify: F) -> Self
  where
    F: Fn(&str) -> String + Send + Sync + 'static,
  {
    self.options.slugifier = Arc::new(slugify);
    self
  }

  /// Build the final `RenderOptions`.
  #[must_use]
  pub fn build(self) -> RenderOptions {
    self.options
  }
}
