//! Target platform identification.
//!
//! A [`Platform`] is the operating system family a descriptor is resolved for.
//! Names are parsed leniently: anything that is not recognisably Windows or
//! macOS is treated as a generic Unix target.

pub mod paths;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Operating system families the resolver knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  Windows,
  #[serde(rename = "macos")]
  MacOs,
  Unix,
}

impl Platform {
  pub const ALL: [Platform; 3] = [Platform::Windows, Platform::MacOs, Platform::Unix];

  /// Map the host operating system to a platform.
  ///
  /// Hosts that are neither Windows nor macOS are generic Unix.
  pub fn current() -> Self {
    Self::from_os(std::env::consts::OS)
  }

  fn from_os(os: &str) -> Self {
    match os {
      "windows" => Self::Windows,
      "macos" | "ios" => Self::MacOs,
      _ => Self::Unix,
    }
  }

  /// Parse a platform name, case-insensitively.
  ///
  /// Unrecognised names resolve to [`Platform::Unix`] and log a warning.
  pub fn from_name(name: &str) -> Self {
    match Self::recognize(name) {
      Some(platform) => platform,
      None => {
        warn!(name, "unrecognized platform, falling back to unix");
        Self::Unix
      }
    }
  }

  /// Parse a platform name without falling back.
  pub fn recognize(name: &str) -> Option<Self> {
    match name.trim().to_ascii_lowercase().as_str() {
      "windows" | "win32" | "win64" | "win" => Some(Self::Windows),
      "macos" | "osx" | "darwin" | "mac" => Some(Self::MacOs),
      "unix" | "linux" | "freebsd" | "openbsd" | "netbsd" => Some(Self::Unix),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this platform
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::Unix => "unix",
    }
  }

  pub fn is_windows(&self) -> bool {
    matches!(self, Self::Windows)
  }
}

impl Default for Platform {
  fn default() -> Self {
    Self::current()
  }
}

impl FromStr for Platform {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from_name(s))
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
