//! # markrender - HTML rendering back end for markdown parsers
//!
//! `markrender` is the last step of a markdown pipeline. A parser walks its
//! document and calls one [`Renderer`] method per construct (heading, code
//! block, list item, link, ...), and the renderer answers with that
//! construct's HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use markrender::{RenderOptions, Renderer};
//!
//! let mut renderer = Renderer::new(RenderOptions::default());
//! let mut html = renderer.heading("Install", 2, "Install");
//! html += &renderer.code("cargo add markrender", Some("sh"), false);
//! html += &renderer.heading("Install", 2, "Install");
//!
//! assert!(html.contains(r#"<h2 id="install">"#));
//! assert!(html.contains(r#"<h2 id="install-1">"#));
//! ```
//!
//! A complete driver for `pulldown-cmark` lives in [`events`]:
//!
//! ```rust
//! use markrender::{RenderOptions, events::render_markdown};
//!
//! let doc = render_markdown("- [x] done\n- [ ] todo\n", RenderOptions::default());
//! assert!(doc.html.starts_with(r#"<ul class="task-list">"#));
//! ```
//!
//! ## Features
//!
//! - **Collision-free heading anchors**: repeated headings get `-1`, `-2`, ...
//!   suffixes and ids are never reused within a document
//! - **Link sanitization** against `javascript:`, `vbscript:` and `data:`
//!   hrefs, including entity- and percent-encoded variants
//! - **Pluggable highlighting** through the [`syntax::Highlight`] trait, with
//!   an optional syntect backend
//! - **XHTML output**, `data-line` ranges for code blocks, task lists, tables
//!   and new-tab links
//!
//! ## Configuration
//!
//! ```rust
//! use markrender::{RenderOptionsBuilder, Renderer};
//!
//! let options = RenderOptionsBuilder::new()
//!   .sanitize(true)
//!   .xhtml(true)
//!   .links_in_new_tab_when(|href| href.starts_with("https://"))
//!   .build();
//!
//! let renderer = Renderer::new(options);
//! assert_eq!(renderer.link("javascript:alert(1)", None, "x"), "");
//! assert_eq!(renderer.br(), "<br/>");
//! ```

pub mod anchor;
pub mod error;
pub mod events;
mod options;
mod renderer;
pub mod syntax;
mod types;
pub mod utils;

pub use crate::{
  error::{ConfigError, SanitizeError},
  options::{
    LinkPredicate,
    LinkTarget,
    RenderOptions,
    RenderOptionsBuilder,
    Slugifier,
  },
  renderer::{DEFAULT_INLINE_LANGUAGE, Renderer},
  types::{Alignment, CellFlags, Header, RenderedDocument},
};
