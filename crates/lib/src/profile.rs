//! Resolution profiles.
//!
//! The same platform has historically been configured in materially different
//! ways: with or without the threading flag on Windows, with explicit system
//! libraries or link-time defaults, with the platform crypto frameworks or a
//! portable OpenSSL stack on macOS, and with OpenSSL-driven or generic SHA1 on
//! other Unixes. Each of those variants is a [`Profile`], and every profile is
//! backed by one row of the rule table returned by [`Profile::rules`].
//!
//! | rule                  | native          | portable-ssl | link-defaults   | transitional          |
//! |-----------------------|-----------------|--------------|-----------------|-----------------------|
//! | `windows_threads`     | yes             | yes          | no              | yes                   |
//! | `windows_system_libs` | yes             | yes          | no              | no                    |
//! | `macos_ssl`           | secure-transport| openssl      | secure-transport| secure-transport      |
//! | `unix_crypto`         | openssl         | openssl      | generic         | generic-with-openssl  |
//! | `unix_ssl_define`     | no              | yes          | no              | no                    |
//! | `unix_ssl_libs`       | no              | yes          | no              | yes                   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A named variant of the resolution rules.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
  /// Platform-native crypto everywhere but generic Unix, explicit system libs.
  #[default]
  Native,
  /// OpenSSL-family shared libraries on macOS and Unix.
  PortableSsl,
  /// No threading flag and no explicit libraries; generic SHA1 on Unix.
  LinkDefaults,
  /// Generic SHA1 alongside the OpenSSL transport on Unix.
  Transitional,
}

/// SSL provider on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MacSsl {
  /// CoreFoundation and Security frameworks.
  SecureTransport,
  /// `libcrypto.dylib` and `libssl.dylib`.
  OpenSsl,
}

/// Hashing and transport selection on generic Unix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnixCrypto {
  OpenSsl,
  Generic,
  GenericWithOpenSsl,
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileRules {
  pub windows_threads: bool,
  pub windows_system_libs: bool,
  pub macos_ssl: MacSsl,
  pub unix_crypto: UnixCrypto,
  pub unix_ssl_define: bool,
  pub unix_ssl_libs: bool,
}

impl Profile {
  pub const ALL: [Profile; 4] = [
    Profile::Native,
    Profile::PortableSsl,
    Profile::LinkDefaults,
    Profile::Transitional,
  ];

  pub fn rules(&self) -> ProfileRules {
    match self {
      Self::Native => ProfileRules {
        windows_threads: true,
        windows_system_libs: true,
        macos_ssl: MacSsl::SecureTransport,
        unix_crypto: UnixCrypto::OpenSsl,
        unix_ssl_define: false,
        unix_ssl_libs: false,
      },
      Self::PortableSsl => ProfileRules {
        windows_threads: true,
        windows_system_libs: true,
        macos_ssl: MacSsl::OpenSsl,
        unix_crypto: UnixCrypto::OpenSsl,
        unix_ssl_define: true,
        unix_ssl_libs: true,
      },
      Self::LinkDefaults => ProfileRules {
        windows_threads: false,
        windows_system_libs: false,
        macos_ssl: MacSsl::SecureTransport,
        unix_crypto: UnixCrypto::Generic,
        unix_ssl_define: false,
        unix_ssl_libs: false,
      },
      Self::Transitional => ProfileRules {
        windows_threads: true,
        windows_system_libs: false,
        macos_ssl: MacSsl::SecureTransport,
        unix_crypto: UnixCrypto::GenericWithOpenSsl,
        unix_ssl_define: false,
        unix_ssl_libs: true,
      },
    }
  }

  /// Parse a profile name, accepting `-` or `_` separators.
  ///
  /// Unrecognised names resolve to [`Profile::Native`] and log a warning.
  pub fn from_name(name: &str) -> Self {
    match Self::recognize(name) {
      Some(profile) => profile,
      None => {
        warn!(name, "unrecognized profile, falling back to native");
        Self::default()
      }
    }
  }

  pub fn recognize(name: &str) -> Option<Self> {
    match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
      "native" => Some(Self::Native),
      "portable-ssl" | "portable" | "openssl" => Some(Self::PortableSsl),
      "link-defaults" => Some(Self::LinkDefaults),
      "transitional" => Some(Self::Transitional),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Native => "native",
      Self::PortableSsl => "portable-ssl",
      Self::LinkDefaults => "link-defaults",
      Self::Transitional => "transitional",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Self::Native => "platform crypto APIs, explicit Windows system libraries",
      Self::PortableSsl => "OpenSSL shared libraries on macOS and Unix, explicit SSL enable",
      Self::LinkDefaults => "no threading flag, link-time default libraries, generic SHA1 on Unix",
      Self::Transitional => "generic SHA1 with OpenSSL transport on Unix, no explicit Windows libraries",
    }
  }
}

impl FromStr for Profile {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from_name(s))
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl fmt::Display for MacSsl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::SecureTransport => "secure-transport",
      Self::OpenSsl => "openssl",
    })
  }
}

impl fmt::Display for UnixCrypto {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::OpenSsl => "openssl",
      Self::Generic => "generic",
      Self::GenericWithOpenSsl => "generic-with-openssl",
    })
  }
}
