//! The per-document HTML renderer.
//!
//! A parser walks its document tree and calls one [`Renderer`] method per
//! construct, children first, passing the children's HTML into the parent's
//! call. Every method returns the HTML for exactly one construct.
//!
//! # Examples
//!
//! ```
//! use markrender::{RenderOptions, Renderer};
//!
//! let mut renderer = Renderer::new(RenderOptions::default());
//! let title = renderer.heading("Hello <em>there</em>", 1, "Hello there");
//! let body = renderer.paragraph(&renderer.strong("bold"));
//!
//! assert_eq!(title, "<h1 id=\"hello-there\">Hello <em>there</em></h1>\n");
//! assert_eq!(body, "<p><strong>bold</strong></p>\n");
//! ```

use std::borrow::Cow;

use crate::{
  anchor::HeadingHistory,
  options::RenderOptions,
  types::{CellFlags, Header},
  utils::{codeblock::LanguageTag, escape, url::check_href},
};

/// Language class given to inline code when
/// [`RenderOptions::code_span_highlighted`] is set.
pub const DEFAULT_INLINE_LANGUAGE: &str = "markup";

/// Stateful HTML formatter for a single document.
///
/// The only state is the heading history used to keep anchor ids unique, so
/// create one renderer per document and drop it afterwards.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
  options:  RenderOptions,
  headings: HeadingHistory,
  headers:  Vec<Header>,
}

#[allow(
  clippy::unused_self,
  reason = "Every construct is a method so callers need no special cases"
)]
impl Renderer {
  /// Create a renderer for one document.
  #[must_use]
  pub fn new(options: RenderOptions) -> Self {
    Self {
      options,
      headings: HeadingHistory::new(),
      headers: Vec::new(),
    }
  }

  /// Access renderer options.
  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// Headings seen so far in this document.
  #[must_use]
  pub const fn history(&self) -> &HeadingHistory {
    &self.headings
  }

  /// Header records for every heading rendered so far.
  #[must_use]
  pub fn headers(&self) -> &[Header] {
    &self.headers
  }

  /// Consume the renderer, keeping its header records.
  #[must_use]
  pub fn into_headers(self) -> Vec<Header> {
    self.headers
  }

  // Block level

  /// Render a code block.
  ///
  /// `escaped` tells whether `code` is already HTML-escaped. A configured
  /// highlighter gets the first go at the code; if it changes anything, its
  /// output is used verbatim.
  #[must_use]
  pub fn code(&self, code: &str, lang: Option<&str>, escaped: bool) -> String {
    let tag = LanguageTag::parse(lang, self.options.data_line);
    let data_line = tag
      .line_range()
      .map(|range| format!(r#" data-line="{range}""#))
      .unwrap_or_default();

    let highlighted = self.highlight(code, tag.lang().unwrap_or_default());
    let body = match &highlighted {
      Some(html) => Cow::Borrowed(html.as_str()),
      None if escaped => Cow::Borrowed(code),
      None => escape(code, true),
    };

    match tag.lang() {
      None => format!("<pre{data_line}><code>{body}\n</code></pre>"),
      Some(lang) => {
        format!(
          "<pre{data_line}><code class=\"{}{}\">{body}\n</code></pre>\n",
          self.options.lang_prefix,
          escape(lang, true)
        )
      },
    }
  }

  /// Run the configured highlighter, keeping its output only if it changed
  /// the code.
  fn highlight(&self, code: &str, lang: &str) -> Option<String> {
    let highlighter = self.options.highlight.as_ref()?;
    let out = highlighter.highlight(code, lang).filter(|out| out != code);
    log::trace!(
      "Highlighter {} code block (lang: {lang:?})",
      if out.is_some() { "handled" } else { "declined" }
    );
    out
  }

  #[must_use]
  pub fn blockquote(&self, quote: &str) -> String {
    format!("<blockquote>\n{quote}</blockquote>\n")
  }

  /// Raw HTML passes through untouched.
  #[must_use]
  pub fn html(&self, html: &str) -> String {
    html.to_string()
  }

  /// Render a heading with a unique anchor id.
  ///
  /// `text` is the rendered inline HTML, `raw` the heading's source text used
  /// to derive the id.
  pub fn heading(&mut self, text: &str, level: u8, raw: &str) -> String {
    let base = (self.options.slugifier)(raw);
    let slug = self.headings.allocate(raw, &base);
    let id = format!("{}{slug}", self.options.header_prefix);

    self.headers.push(Header {
      text: raw.to_string(),
      level,
      id: id.clone(),
    });

    format!("<h{level} id=\"{id}\">{text}</h{level}>\n")
  }

  #[must_use]
  pub fn hr(&self) -> String {
    if self.options.xhtml {
      "<hr/>\n".to_string()
    } else {
      "<hr>\n".to_string()
    }
  }

  #[must_use]
  pub fn list(&self, body: &str, ordered: bool, task_list: bool) -> String {
    let tag = if ordered { "ol" } else { "ul" };
    let class = if task_list { r#" class="task-list""# } else { "" };
    format!("<{tag}{class}>\n{body}</{tag}>\n")
  }

  /// Render a list item.
  ///
  /// `checked` is `None` for ordinary items. `Some(_)` marks a task item and
  /// renders a checkbox in front of the text.
  #[must_use]
  pub fn listitem(&self, text: &str, checked: Option<bool>) -> String {
    match checked {
      None => format!("<li>{text}</li>\n"),
      Some(checked) => {
        let checked = if checked { " checked" } else { "" };
        format!(
          "<li class=\"task-list-item\"><input type=\"checkbox\" \
           class=\"task-list-item-checkbox\"{checked}> {text}</li>\n"
        )
      },
    }
  }

  #[must_use]
  pub fn paragraph(&self, text: &str) -> String {
    format!("<p>{text}</p>\n")
  }

  #[must_use]
  pub fn table(&self, header: &str, body: &str) -> String {
    format!(
      "<table>\n<thead>\n{header}</thead>\n<tbody>\n{body}</tbody>\n</table>\n"
    )
  }

  #[must_use]
  pub fn tablerow(&self, content: &str) -> String {
    format!("<tr>\n{content}</tr>\n")
  }

  #[must_use]
  pub fn tablecell(&self, content: &str, flags: CellFlags) -> String {
    let tag = if flags.header { "th" } else { "td" };
    match flags.align {
      Some(align) => {
        format!(
          "<{tag} style=\"text-align:{}\">{content}</{tag}>\n",
          align.as_str()
        )
      },
      None => format!("<{tag}>{content}</{tag}>\n"),
    }
  }

  // Span level

  #[must_use]
  pub fn strong(&self, text: &str) -> String {
    format!("<strong>{text}</strong>")
  }

  #[must_use]
  pub fn em(&self, text: &str) -> String {
    format!("<em>{text}</em>")
  }

  #[must_use]
  pub fn codespan(&self, text: &str) -> String {
    if self.options.code_span_highlighted {
      format!(
        "<code class=\"{}{DEFAULT_INLINE_LANGUAGE}\">{text}</code>",
        self.options.lang_prefix
      )
    } else {
      format!("<code>{text}</code>")
    }
  }

  #[must_use]
  pub fn br(&self) -> String {
    if self.options.xhtml {
      "<br/>".to_string()
    } else {
      "<br>".to_string()
    }
  }

  #[must_use]
  pub fn del(&self, text: &str) -> String {
    format!("<del>{text}</del>")
  }

  /// Render a link.
  ///
  /// With [`RenderOptions::sanitize`] set, links to script-capable protocols
  /// and links with malformed percent escapes render as an empty string.
  #[must_use]
  pub fn link(&self, href: &str, title: Option<&str>, text: &str) -> String {
    if self.options.sanitize
      && let Err(e) = check_href(href)
    {
      log::debug!("Dropping link to {href:?}: {e}");
      return String::new();
    }

    let title_attr = title_attr(title);
    let target_attr = if self.options.links_in_new_tab.opens_new_tab(href) {
      r#" target="_blank""#
    } else {
      ""
    };
    format!(r#"<a href="{href}"{title_attr}{target_attr}>{text}</a>"#)
  }

  /// Render an image. Image sources are never sanitized.
  #[must_use]
  pub fn image(&self, href: &str, title: Option<&str>, text: &str) -> String {
    let title_attr = title_attr(title);
    let close = if self.options.xhtml { "/>" } else { ">" };
    format!(r#"<img src="{href}" alt="{text}"{title_attr}{close}"#)
  }

  /// Plain text passes through untouched; escaping it is the parser's job.
  #[must_use]
  pub fn text(&self, text: &str) -> String {
    text.to_string()
  }
}

fn title_attr(title: Option<&str>) -> String {
  title
    .filter(|title| !title.is_empty())
    .map(|title| format!(r#" title="{title}""#))
    .unwrap_or_default()
}
