mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kitconf_lib::SettingsSources;
use kitconf_lib::settings::SettingsLayer;

use crate::cmd::{cmd_diff, cmd_info, cmd_profiles, cmd_resolve};
use crate::output::OutputFormat;

/// kitconf - platform-conditional build descriptors for kitgit
#[derive(Parser)]
#[command(name = "kitconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Config file (default: ./kitconf.toml, then the user config dir)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve the build descriptor for a platform and profile
  Resolve {
    /// Target platform (windows, macos, unix, ...)
    #[arg(short, long)]
    platform: Option<String>,

    /// Rule profile (native, portable-ssl, link-defaults, transitional)
    #[arg(long)]
    profile: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Output as JSON (same as --format json)
    #[arg(long)]
    json: bool,

    /// Write the descriptor as JSON to this file instead of printing it
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },

  /// List profiles and the rules each one applies
  Profiles {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Output as JSON (same as --format json)
    #[arg(long)]
    json: bool,
  },

  /// Compare the descriptors of two targets, written platform[:profile]
  Diff {
    /// Left-hand target, e.g. macos:native
    from: String,

    /// Right-hand target, e.g. macos:portable-ssl
    to: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Output as JSON (same as --format json)
    #[arg(long)]
    json: bool,
  },

  /// Show the host platform and effective settings
  Info {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Output as JSON (same as --format json)
    #[arg(long)]
    json: bool,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let sources = |overrides: SettingsLayer| SettingsSources {
    config_path: cli.config.clone(),
    overrides,
    ..Default::default()
  };

  match cli.command {
    Commands::Resolve {
      platform,
      profile,
      format,
      json,
      output,
    } => {
      let overrides = SettingsLayer {
        platform,
        profile,
        ..Default::default()
      };
      cmd_resolve(&sources(overrides), format.or_json(json), output.as_deref())
    }
    Commands::Profiles { format, json } => cmd_profiles(format.or_json(json)),
    Commands::Diff { from, to, format, json } => {
      cmd_diff(&sources(SettingsLayer::default()), &from, &to, format.or_json(json))
    }
    Commands::Info { format, json } => cmd_info(&sources(SettingsLayer::default()), format.or_json(json)),
  }
}
