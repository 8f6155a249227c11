//! Layered settings.
//!
//! Decides which platform, profile and source layout to resolve for. Layers,
//! lowest to highest precedence:
//!
//! 1. Built-in defaults (host platform, `native`, `Sources`, `libgit2`)
//! 2. TOML config file (explicit path, `./kitconf.toml`, or the user config dir)
//! 3. Environment (`KITCONF_PLATFORM`, `KITCONF_PROFILE`)
//! 4. Caller overrides (CLI flags)
//!
//! Each layer is a [`SettingsLayer`] of optional values; a value set in a
//! higher layer replaces the one below it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{DEFAULT_PROJECT_NAME, ENV_PLATFORM, ENV_PROFILE, LOCAL_CONFIG_FILE, USER_CONFIG_FILE};
use crate::descriptor::{BuildDescriptor, Layout};
use crate::platform::{Platform, paths};
use crate::profile::Profile;
use crate::resolve::{Target, resolve_named};

/// Errors loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("config file not found: {path}")]
  NotFound { path: PathBuf },

  #[error("failed to read config file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// One layer of optional settings. Also the schema of the config file.
///
/// ```toml
/// platform = "macos"
/// profile = "portable-ssl"
/// name = "kitgit"
/// app_root = "Sources"
/// lib_root = "libgit2"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsLayer {
  pub platform: Option<String>,
  pub profile: Option<String>,
  pub name: Option<String>,
  pub app_root: Option<String>,
  pub lib_root: Option<String>,
}

impl SettingsLayer {
  pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml(&content, path)
  }

  /// Platform and profile from the environment. Empty values are ignored.
  pub fn from_env() -> Self {
    let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
    Self {
      platform: var(ENV_PLATFORM),
      profile: var(ENV_PROFILE),
      ..Default::default()
    }
  }

  /// Stack `overlay` on top of `self`; values set in `overlay` win.
  pub fn merge(self, overlay: SettingsLayer) -> Self {
    Self {
      platform: overlay.platform.or(self.platform),
      profile: overlay.profile.or(self.profile),
      name: overlay.name.or(self.name),
      app_root: overlay.app_root.or(self.app_root),
      lib_root: overlay.lib_root.or(self.lib_root),
    }
  }
}

/// Where settings come from, as supplied by the caller.
#[derive(Debug, Default, Clone)]
pub struct SettingsSources {
  /// Explicit config file; it must exist.
  pub config_path: Option<PathBuf>,
  /// Directory searched for `kitconf.toml` when no explicit path is given.
  /// Defaults to the working directory.
  pub search_dir: Option<PathBuf>,
  /// Skip the user config directory lookup.
  pub skip_user_config: bool,
  /// Highest-precedence values, typically CLI flags.
  pub overrides: SettingsLayer,
}

/// Fully decided settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
  pub name: String,
  pub platform: Platform,
  pub profile: Profile,
  pub layout: Layout,
  /// The config file that contributed, if any.
  pub config_path: Option<PathBuf>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      name: DEFAULT_PROJECT_NAME.to_string(),
      platform: Platform::current(),
      profile: Profile::default(),
      layout: Layout::default(),
      config_path: None,
    }
  }
}

impl Settings {
  pub fn load(sources: &SettingsSources) -> Result<Self, ConfigError> {
    let config_path = find_config(sources)?;
    let file_layer = match &config_path {
      Some(path) => {
        info!(path = %path.display(), "loading config file");
        SettingsLayer::load(path)?
      }
      None => SettingsLayer::default(),
    };

    let merged = file_layer
      .merge(SettingsLayer::from_env())
      .merge(sources.overrides.clone());
    debug!(?merged, "merged settings layers");

    Ok(Self::from_layer(merged, config_path))
  }

  /// Apply a merged layer over the built-in defaults.
  pub fn from_layer(layer: SettingsLayer, config_path: Option<PathBuf>) -> Self {
    let defaults = Self::default();
    Self {
      name: layer.name.unwrap_or(defaults.name),
      platform: layer.platform.as_deref().map_or(defaults.platform, Platform::from_name),
      profile: layer.profile.as_deref().map_or(defaults.profile, Profile::from_name),
      layout: Layout {
        app_root: layer.app_root.unwrap_or(defaults.layout.app_root),
        lib_root: layer.lib_root.unwrap_or(defaults.layout.lib_root),
      },
      config_path,
    }
  }

  pub fn target(&self) -> Target {
    Target::new(self.platform, self.profile)
  }

  pub fn resolve(&self) -> BuildDescriptor {
    self.resolve_target(self.target())
  }

  /// Resolve another target with this project's name and layout.
  pub fn resolve_target(&self, target: Target) -> BuildDescriptor {
    resolve_named(&self.name, target.platform, target.profile, &self.layout)
  }
}

fn find_config(sources: &SettingsSources) -> Result<Option<PathBuf>, ConfigError> {
  if let Some(path) = &sources.config_path {
    if !path.is_file() {
      return Err(ConfigError::NotFound { path: path.clone() });
    }
    return Ok(Some(path.clone()));
  }

  let search_dir = sources.search_dir.clone().unwrap_or_else(|| PathBuf::from("."));
  let local = search_dir.join(LOCAL_CONFIG_FILE);
  if local.is_file() {
    return Ok(Some(local));
  }

  if sources.skip_user_config {
    return Ok(None);
  }

  Ok(paths::config_dir().map(|dir| dir.join(USER_CONFIG_FILE)).filter(|user| user.is_file()))
}
