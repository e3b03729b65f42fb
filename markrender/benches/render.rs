#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in benchmarks"
)]
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markrender::{
  RenderOptions,
  RenderOptionsBuilder,
  Renderer,
  events::render_markdown,
  utils::{slugify, url::check_href},
};

const DOC_SMALL: &str = r"# Getting Started

Install the package and run it once.

```sh
cargo install markrender
```
";

const DOC_LARGE: &str = r#"# Reference

## Options

| Name          | Default     | Effect                              |
|:--------------|:-----------:|------------------------------------:|
| `lang_prefix` | `language-` | Class prefix for code blocks        |
| `xhtml`       | `false`     | Self-closing void elements          |
| `sanitize`    | `false`     | Drop links to script-capable hrefs  |

## Usage

Render a document with *default* options, or build your own with
**`RenderOptionsBuilder`**. Links such as [the docs](https://example.com "Docs")
and <https://example.org> are left alone unless ~~unsafe~~ sanitization says
otherwise.

```rust{2,4-5}
use markrender::{RenderOptions, events::render_markdown};

let doc = render_markdown("# Hi", RenderOptions::default());
assert_eq!(doc.title.as_deref(), Some("Hi"));
println!("{}", doc.html);
```

## Usage

- [x] Headings get unique anchors
- [x] Tables keep their alignment
- [ ] Footnotes

> Raw <span class="note">HTML</span> passes through.
> So does `inline code`.

1. First
2. Second
3. Third

---

## Usage

![diagram](img/flow.svg "Flow")
"#;

fn bench_render_markdown(c: &mut Criterion) {
  let mut group = c.benchmark_group("render_markdown");

  let plain = RenderOptions::default();
  let strict = RenderOptionsBuilder::new()
    .sanitize(true)
    .data_line(true)
    .xhtml(true)
    .links_in_new_tab_when(|href| href.starts_with("http"))
    .build();

  for (name, doc) in [("small", DOC_SMALL), ("large", DOC_LARGE)] {
    group.bench_with_input(BenchmarkId::new("default", name), &doc, |b, doc| {
      b.iter(|| render_markdown(black_box(doc), plain.clone()));
    });

    group.bench_with_input(BenchmarkId::new("strict", name), &doc, |b, doc| {
      b.iter(|| render_markdown(black_box(doc), strict.clone()));
    });
  }

  group.finish();
}

fn bench_heading_ids(c: &mut Criterion) {
  let mut group = c.benchmark_group("heading_ids");

  for count in [10_usize, 100, 1000] {
    group.bench_with_input(
      BenchmarkId::new("repeated", count),
      &count,
      |b, &count| {
        b.iter(|| {
          let mut renderer = Renderer::new(RenderOptions::default());
          for _ in 0..count {
            black_box(renderer.heading("Usage", 2, "Usage"));
          }
        });
      },
    );
  }

  group.bench_function("slugify", |b| {
    b.iter(|| slugify(black_box("  Hello, World! (Part 2) \u{2014} Notes  ")));
  });

  group.finish();
}

fn bench_check_href(c: &mut Criterion) {
  let mut group = c.benchmark_group("check_href");

  for (name, href) in [
    ("plain", "https://example.com/docs/index.html"),
    ("encoded", "java&#115;cript%3Aalert(1)"),
    ("malformed", "/search?q=100%"),
  ] {
    group.bench_with_input(BenchmarkId::from_parameter(name), &href, |b, href| {
      b.iter(|| check_href(black_box(href)));
    });
  }

  group.finish();
}

criterion_group!(
  benches,
  bench_render_markdown,
  bench_heading_ids,
  bench_check_href
);
criterion_main!(benches);
