//! Implementation of the `kitconf resolve` command.
//!
//! Loads the layered settings, resolves the descriptor, and prints it or
//! writes it to a JSON file for the build executor.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use kitconf_lib::util::hash::Hashable;
use kitconf_lib::{BuildDescriptor, Settings, SettingsSources};

use crate::output::{OutputFormat, print_item, print_json, print_section, print_stat, print_success, truncate_hash};

pub fn cmd_resolve(sources: &SettingsSources, format: OutputFormat, output: Option<&Path>) -> Result<()> {
  let settings = Settings::load(sources).context("Failed to load settings")?;
  let descriptor = settings.resolve();

  if let Some(path) = output {
    let json = serde_json::to_string_pretty(&descriptor).context("Failed to serialize descriptor")?;
    fs::write(path, json).with_context(|| format!("Failed to write descriptor: {}", path.display()))?;
    debug!(path = %path.display(), "wrote descriptor");
    print_success(&format!("Wrote {} descriptor to {}", settings.target(), path.display()));
    return Ok(());
  }

  if format.is_json() {
    print_json(&descriptor)?;
  } else {
    print_descriptor(&descriptor)?;
  }

  Ok(())
}

fn print_descriptor(descriptor: &BuildDescriptor) -> Result<()> {
  let hash = descriptor.compute_hash().context("Failed to compute descriptor fingerprint")?;

  println!("{} ({}:{})", descriptor.name(), descriptor.platform(), descriptor.profile());
  print_stat("Crypto", descriptor.crypto().as_str());
  print_stat("Fingerprint", truncate_hash(&hash.0));

  print_section("Excludes:");
  for pattern in descriptor.excludes() {
    print_item(pattern, None);
  }

  print_section("Files:");
  for group in descriptor.file_groups() {
    let layer = group.layer.map(|l| l.to_string());
    print_item(&group.path(descriptor.layout()), layer.as_deref());
  }

  print_section("Include dirs:");
  for path in descriptor.include_paths() {
    print_item(&path, None);
  }

  print_section("Defines:");
  for define in descriptor.defines() {
    print_item(&define.to_string(), None);
  }

  print_section("Libraries:");
  if descriptor.libs().is_empty() {
    println!("  (link-time defaults)");
  }
  for lib in descriptor.libs() {
    print_item(lib.as_str(), lib.is_file().then_some("file"));
  }

  Ok(())
}
