//! Drive a [`Renderer`] from a `pulldown-cmark` event stream.
//!
//! The renderer itself never parses markdown. This module is the parser side
//! of that contract: it buffers the HTML of each open construct, and when the
//! construct closes, hands the buffered children to the matching renderer
//! method and appends the result to the parent.
//!
//! Escaping plain text, inline code and link attributes is the parser's job,
//! so it happens here before the renderer is called.

use pulldown_cmark::{
  Alignment as ColumnAlignment,
  CodeBlockKind,
  Event,
  HeadingLevel,
  LinkType,
  Options,
  Parser,
  Tag,
  TagEnd,
};

use crate::{
  options::RenderOptions,
  renderer::Renderer,
  types::{Alignment, CellFlags, RenderedDocument},
  utils::{codeblock::fence_language, escape},
};

/// Markdown extensions the driver turns on: GFM tables, task lists and
/// strikethrough.
#[must_use]
pub fn parser_options() -> Options {
  Options::ENABLE_TABLES
    | Options::ENABLE_TASKLISTS
    | Options::ENABLE_STRIKETHROUGH
}

/// Render a markdown document with a fresh [`Renderer`].
///
/// # Examples
///
/// ```
/// use markrender::{RenderOptions, events::render_markdown};
///
/// let doc = render_markdown("# Intro\n\nHello *world*", RenderOptions::default());
/// assert_eq!(
///   doc.html,
///   "<h1 id=\"intro\">Intro</h1>\n<p>Hello <em>world</em></p>\n"
/// );
/// assert_eq!(doc.title.as_deref(), Some("Intro"));
/// ```
#[must_use]
pub fn render_markdown(markdown: &str, options: RenderOptions) -> RenderedDocument {
  let mut renderer = Renderer::new(options);
  let html = render_events(
    Parser::new_ext(markdown, parser_options()),
    &mut renderer,
  );
  let headers = renderer.into_headers();
  let title = headers
    .iter()
    .find(|header| header.level == 1)
    .map(|header| header.text.clone());

  RenderedDocument {
    html,
    headers,
    title,
  }
}

/// Render an event stream through `renderer`.
///
/// The renderer keeps its heading history afterwards, so its header records
/// can be inspected once rendering is done.
pub fn render_events<'a, I>(events: I, renderer: &mut Renderer) -> String
where
  I: IntoIterator<Item = Event<'a>>,
{
  let mut driver = EventDriver::new(renderer);
  for event in events {
    driver.event(event);
  }
  driver.finish()
}

/// An open construct and the HTML of its children so far.
struct Frame {
  kind: FrameKind,
  buf:  String,
}

enum FrameKind {
  Paragraph,
  Heading(u8),
  BlockQuote,
  CodeBlock { lang: Option<String> },
  List { ordered: bool, task_list: bool },
  Item { checked: Option<bool> },
  Table { head: String },
  TableHead,
  TableRow,
  TableCell(CellFlags),
  Emphasis,
  Strong,
  Strikethrough,
  Link { href: String, title: String },
  Image { src: String, title: String },
  /// Constructs the renderer has no method for; children pass through.
  Passthrough,
}

struct EventDriver<'r> {
  renderer:      &'r mut Renderer,
  stack:         Vec<Frame>,
  output:        String,
  heading_raw:   Option<String>,
  alignments:    Vec<Option<Alignment>>,
  in_table_head: bool,
  cell_index:    usize,
  // Image alt text is plain text, so nested inline tags are flattened.
  image_depth:   usize,
}

impl<'r> EventDriver<'r> {
  const fn new(renderer: &'r mut Renderer) -> Self {
    Self {
      renderer,
      stack: Vec::new(),
      output: String::new(),
      heading_raw: None,
      alignments: Vec::new(),
      in_table_head: false,
      cell_index: 0,
      image_depth: 0,
    }
  }

  fn finish(mut self) -> String {
    // Unclosed constructs only show up with hand-built event streams.
    while let Some(frame) = self.stack.pop() {
      log::warn!("Closing construct left open at end of input");
      self.append(&frame.buf);
    }
    self.output
  }

  fn append(&mut self, html: &str) {
    match self.stack.last_mut() {
      Some(frame) => frame.buf.push_str(html),
      None => self.output.push_str(html),
    }
  }

  fn in_code_block(&self) -> bool {
    matches!(
      self.stack.last(),
      Some(Frame {
        kind: FrameKind::CodeBlock { .. },
        ..
      })
    )
  }

  fn event(&mut self, event: Event<'_>) {
    match event {
      Event::Start(tag) => self.start(tag),
      Event::End(tag) => self.end(tag),
      Event::Text(text) => {
        if let Some(raw) = &mut self.heading_raw {
          raw.push_str(&text);
        }
        if self.in_code_block() {
          self.append(&text);
        } else if self.image_depth > 0 {
          self.append(&escape(&text, true));
        } else {
          let html = self.renderer.text(&escape(&text, false));
          self.append(&html);
        }
      },
      Event::Code(code) => {
        if let Some(raw) = &mut self.heading_raw {
          raw.push_str(&code);
        }
        if self.image_depth > 0 {
          self.append(&escape(&code, true));
        } else {
          let html = self.renderer.codespan(&escape(&code, true));
          self.append(&html);
        }
      },
      Event::Html(html) | Event::InlineHtml(html) => {
        if self.image_depth == 0 {
          let html = self.renderer.html(&html);
          self.append(&html);
        }
      },
      Event::SoftBreak => {
        let sep = if self.image_depth > 0 { " " } else { "\n" };
        self.append(sep);
      },
      Event::HardBreak => {
        if self.image_depth > 0 {
          self.append(" ");
        } else {
          let html = self.renderer.br();
          self.append(&html);
        }
      },
      Event::Rule => {
        let html = self.renderer.hr();
        self.append(&html);
      },
      Event::TaskListMarker(checked) => self.mark_task(checked),
      other => log::trace!("Ignoring unsupported event {other:?}"),
    }
  }

  fn mark_task(&mut self, checked: bool) {
    let item = self.stack.iter_mut().rev().find_map(|frame| {
      match &mut frame.kind {
        FrameKind::Item { checked: state } => Some(state),
        _ => None,
      }
    });
    if let Some(item) = item {
      *item = Some(checked);
    }

    let list = self.stack.iter_mut().rev().find_map(|frame| {
      match &mut frame.kind {
        FrameKind::List { task_list, .. } => Some(task_list),
        _ => None,
      }
    });
    if let Some(list) = list {
      *list = true;
    }
  }

  fn start(&mut self, tag: Tag<'_>) {
    if self.image_depth > 0 {
      if matches!(tag, Tag::Image { .. }) {
        self.image_depth += 1;
      }
      return;
    }

    let kind = match tag {
      Tag::Paragraph => FrameKind::Paragraph,
      Tag::Heading { level, .. } => {
        self.heading_raw = Some(String::new());
        FrameKind::Heading(heading_level_to_num(level))
      },
      Tag::BlockQuote(_) => FrameKind::BlockQuote,
      Tag::CodeBlock(kind) => {
        let lang = match kind {
          CodeBlockKind::Fenced(info) => {
            fence_language(&info).map(str::to_string)
          },
          CodeBlockKind::Indented => None,
        };
        FrameKind::CodeBlock { lang }
      },
      Tag::List(start) => {
        FrameKind::List {
          ordered:   start.is_some(),
          task_list: false,
        }
      },
      Tag::Item => FrameKind::Item { checked: None },
      Tag::Table(alignments) => {
        self.alignments = alignments.into_iter().map(convert_alignment).collect();
        FrameKind::Table {
          head: String::new(),
        }
      },
      Tag::TableHead => {
        self.in_table_head = true;
        self.cell_index = 0;
        FrameKind::TableHead
      },
      Tag::TableRow => {
        self.cell_index = 0;
        FrameKind::TableRow
      },
      Tag::TableCell => {
        let flags = CellFlags {
          header: self.in_table_head,
          align:  self.alignments.get(self.cell_index).copied().flatten(),
        };
        self.cell_index += 1;
        FrameKind::TableCell(flags)
      },
      Tag::Emphasis => FrameKind::Emphasis,
      Tag::Strong => FrameKind::Strong,
      Tag::Strikethrough => FrameKind::Strikethrough,
      Tag::Link {
        link_type,
        dest_url,
        title,
        ..
      } => {
        let href = if matches!(link_type, LinkType::Email) {
          format!("mailto:{dest_url}")
        } else {
          dest_url.to_string()
        };
        FrameKind::Link {
          href:  escape(&href, true).into_owned(),
          title: escape(&title, true).into_owned(),
        }
      },
      Tag::Image {
        dest_url, title, ..
      } => {
        self.image_depth = 1;
        FrameKind::Image {
          src:   escape(&dest_url, true).into_owned(),
          title: escape(&title, true).into_owned(),
        }
      },
      _ => FrameKind::Passthrough,
    };

    self.stack.push(Frame {
      kind,
      buf: String::new(),
    });
  }

  fn end(&mut self, tag: TagEnd) {
    if self.image_depth > 0 {
      if !matches!(tag, TagEnd::Image) {
        return;
      }
      self.image_depth -= 1;
      if self.image_depth > 0 {
        return;
      }
    }

    let Some(Frame { kind, buf }) = self.stack.pop() else {
      log::warn!("Ignoring unbalanced end tag {tag:?}");
      return;
    };

    let html = match kind {
      FrameKind::Paragraph => self.renderer.paragraph(&buf),
      FrameKind::Heading(level) => {
        let raw = self.heading_raw.take().unwrap_or_default();
        self.renderer.heading(&buf, level, &raw)
      },
      FrameKind::BlockQuote => self.renderer.blockquote(&buf),
      FrameKind::CodeBlock { lang } => {
        let code = buf.strip_suffix('\n').unwrap_or(&buf);
        self.renderer.code(code, lang.as_deref(), false)
      },
      FrameKind::List { ordered, task_list } => {
        self.renderer.list(&buf, ordered, task_list)
      },
      FrameKind::Item { checked } => self.renderer.listitem(&buf, checked),
      FrameKind::Table { head } => self.renderer.table(&head, &buf),
      FrameKind::TableHead => {
        self.in_table_head = false;
        let row = self.renderer.tablerow(&buf);
        if let Some(Frame {
          kind: FrameKind::Table { head },
          ..
        }) = self.stack.last_mut()
        {
          *head = row;
        }
        return;
      },
      FrameKind::TableRow => self.renderer.tablerow(&buf),
      FrameKind::TableCell(flags) => self.renderer.tablecell(&buf, flags),
      FrameKind::Emphasis => self.renderer.em(&buf),
      FrameKind::Strong => self.renderer.strong(&buf),
      FrameKind::Strikethrough => self.renderer.del(&buf),
      FrameKind::Link { href, title } => {
        self.renderer.link(&href, Some(&title), &buf)
      },
      FrameKind::Image { src, title } => {
        self.renderer.image(&src, Some(&title), &buf)
      },
      FrameKind::Passthrough => buf,
    };

    self.append(&html);
  }
}

/// Convert heading level enum to number (1-6).
const fn heading_level_to_num(level: HeadingLevel) -> u8 {
  match level {
    HeadingLevel::H1 => 1,
    HeadingLevel::H2 => 2,
    HeadingLevel::H3 => 3,
    HeadingLevel::H4 => 4,
    HeadingLevel::H5 => 5,
    HeadingLevel::H6 => 6,
  }
}

const fn convert_alignment(alignment: ColumnAlignment) -> Option<Alignment> {
  match alignment {
    ColumnAlignment::None => None,
    ColumnAlignment::Left => Some(Alignment::Left),
    ColumnAlignment::Center => Some(Alignment::Center),
    ColumnAlignment::Right => Some(Alignment::Right),
  }
}
