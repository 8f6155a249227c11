//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output: colored status
//! messages, labelled stats, section headers and JSON printing.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }

  /// Apply the `--json` shorthand on top of `--format`.
  pub fn or_json(self, json: bool) -> Self {
    if json { OutputFormat::Json } else { self }
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
  pub const REMOVE: &str = "-";
}

pub fn truncate_hash(hash: &str) -> &str {
  let len = hash.len().min(12);
  &hash[..len]
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_section(title: &str) {
  println!();
  println!("{}", title.if_supports_color(Stream::Stdout, |s| s.bold()));
}

/// Print one list entry under a section, optionally tagged.
pub fn print_item(value: &str, tag: Option<&str>) {
  match tag {
    Some(tag) => println!(
      "  {} {} {}",
      symbols::INFO,
      value,
      format!("[{}]", tag).if_supports_color(Stream::Stdout, |s| s.dimmed())
    ),
    None => println!("  {} {}", symbols::INFO, value),
  }
}

/// Print a diff line with an add/remove/modify marker.
pub fn print_change(marker: &str, value: &str) {
  let colored = match marker {
    symbols::ADD => format!("{}", marker.if_supports_color(Stream::Stdout, |s| s.green())),
    symbols::REMOVE => format!("{}", marker.if_supports_color(Stream::Stdout, |s| s.red())),
    _ => format!("{}", marker.if_supports_color(Stream::Stdout, |s| s.yellow())),
  };
  println!("  {} {}", colored, value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
