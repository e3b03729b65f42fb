#![allow(
  clippy::print_stdout,
  clippy::print_stderr,
  reason = "Fine in examples"
)]
//! Render a markdown file to HTML.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example render -- README.md [options.toml]
//! ```

use std::{env, error::Error, fs, process::ExitCode};

use markrender::{RenderOptions, events::render_markdown};

fn main() -> ExitCode {
  env_logger::init();

  match run() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {e}");
      ExitCode::FAILURE
    },
  }
}

fn run() -> Result<(), Box<dyn Error>> {
  let mut args = env::args().skip(1);
  let Some(input) = args.next() else {
    return Err("usage: render <input.md> [options.toml|options.json]".into());
  };

  let options = match args.next() {
    Some(path) => RenderOptions::from_file(path)?,
    None => RenderOptions::default(),
  };
  log::debug!("Rendering {input} with {options:?}");

  let markdown = fs::read_to_string(&input)?;
  let doc = render_markdown(&markdown, options);

  if let Some(title) = &doc.title {
    eprintln!("Title: {title}");
  }
  for header in &doc.headers {
    eprintln!(
      "{}{} -> #{}",
      "  ".repeat(usize::from(header.level.saturating_sub(1))),
      header.text,
      header.id
    );
  }
  println!("{}", doc.html);

  Ok(())
}
