//! Diff command implementation.
//!
//! Resolves two targets with the same settings and shows which file groups,
//! include dirs, defines and libraries differ between them.

use anyhow::{Context, Result};

use kitconf_lib::descriptor::{DescriptorDiff, diff_descriptors};
use kitconf_lib::{BuildDescriptor, Settings, SettingsSources, Target};

use crate::output::{OutputFormat, print_change, print_info, print_json, print_section, print_stat, symbols};

pub fn cmd_diff(sources: &SettingsSources, from: &str, to: &str, format: OutputFormat) -> Result<()> {
  let settings = Settings::load(sources).context("Failed to load settings")?;

  let from_target = Target::parse(from, settings.profile);
  let to_target = Target::parse(to, settings.profile);
  let a = settings.resolve_target(from_target);
  let b = settings.resolve_target(to_target);
  let diff = diff_descriptors(&a, &b);

  if format.is_json() {
    let output = serde_json::json!({
      "from": from_target,
      "to": to_target,
      "diff": diff,
    });
    print_json(&output)?;
  } else {
    print_human_diff(from_target, to_target, &a, &b, &diff);
  }

  Ok(())
}

fn print_human_diff(from: Target, to: Target, a: &BuildDescriptor, b: &BuildDescriptor, diff: &DescriptorDiff) {
  println!("Comparing {} {} {}", from, symbols::ARROW, to);

  if diff.is_empty() {
    println!();
    print_info("No differences.");
    return;
  }

  if let Some((old, new)) = diff.crypto {
    print_stat("Crypto", &format!("{} {} {}", old, symbols::ARROW, new));
  }

  if !diff.file_groups_added.is_empty() || !diff.file_groups_removed.is_empty() {
    print_section("Files:");
    for group in &diff.file_groups_added {
      print_change(symbols::ADD, &group.path(b.layout()));
    }
    for group in &diff.file_groups_removed {
      print_change(symbols::REMOVE, &group.path(a.layout()));
    }
  }

  if !diff.include_dirs_added.is_empty() || !diff.include_dirs_removed.is_empty() {
    print_section("Include dirs:");
    for dir in &diff.include_dirs_added {
      print_change(symbols::ADD, &dir.path(b.layout()));
    }
    for dir in &diff.include_dirs_removed {
      print_change(symbols::REMOVE, &dir.path(a.layout()));
    }
  }

  if !diff.defines_added.is_empty() || !diff.defines_removed.is_empty() || !diff.defines_changed.is_empty() {
    print_section("Defines:");
    for define in &diff.defines_added {
      print_change(symbols::ADD, &define.to_string());
    }
    for define in &diff.defines_removed {
      print_change(symbols::REMOVE, &define.to_string());
    }
    for changed in &diff.defines_changed {
      let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "(unset)".to_string());
      print_change(
        symbols::MODIFY,
        &format!("{}: {} {} {}", changed.name, show(&changed.from), symbols::ARROW, show(&changed.to)),
      );
    }
  }

  if !diff.libs_added.is_empty() || !diff.libs_removed.is_empty() {
    print_section("Libraries:");
    for lib in &diff.libs_added {
      print_change(symbols::ADD, lib.as_str());
    }
    for lib in &diff.libs_removed {
      print_change(symbols::REMOVE, lib.as_str());
    }
  }

  println!();
  println!("{} change(s)", diff.change_count());
}
