//! Info command implementation.
//!
//! Shows the detected host platform and the settings every other command
//! would resolve with.

use anyhow::{Context, Result};

use kitconf_lib::{Platform, Settings, SettingsSources};

use crate::output::{OutputFormat, print_json, print_section, print_stat};

pub fn cmd_info(sources: &SettingsSources, format: OutputFormat) -> Result<()> {
  let host = Platform::current();
  let settings = Settings::load(sources).context("Failed to load settings")?;

  if format.is_json() {
    let output = serde_json::json!({
      "host": host,
      "version": env!("CARGO_PKG_VERSION"),
      "settings": settings,
    });
    return print_json(&output);
  }

  println!("kitconf v{}", env!("CARGO_PKG_VERSION"));
  print_stat("Host platform", host.as_str());

  print_section("Settings:");
  print_stat("Name", &settings.name);
  print_stat("Target", &settings.target().to_string());
  print_stat("App root", &settings.layout.app_root);
  print_stat("Library root", &settings.layout.lib_root);
  let config = settings
    .config_path
    .as_ref()
    .map(|p| p.display().to_string())
    .unwrap_or_else(|| "(none)".to_string());
  print_stat("Config file", &config);

  Ok(())
}
