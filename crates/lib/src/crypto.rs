//! Crypto backend selection.
//!
//! The backend is never chosen directly. It falls out of the platform branch
//! and the profile rules the resolver applies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform-provided crypto API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeCrypto {
  /// Windows CryptoAPI for hashing, WinHTTP for transport.
  WinCrypt,
  /// CommonCrypto for hashing, Secure Transport for SSL.
  SecureTransport,
}

/// The hashing/SSL implementation a resolved configuration builds against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "api", rename_all = "snake_case")]
pub enum CryptoBackend {
  Native(NativeCrypto),
  OpenSsl,
  /// Built-in hashing only, no SSL library.
  None,
}

impl CryptoBackend {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Native(NativeCrypto::WinCrypt) => "wincrypt",
      Self::Native(NativeCrypto::SecureTransport) => "secure-transport",
      Self::OpenSsl => "openssl",
      Self::None => "none",
    }
  }

  pub fn uses_openssl(&self) -> bool {
    matches!(self, Self::OpenSsl)
  }
}

impl fmt::Display for CryptoBackend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn native_backend_serializes_with_api() {
    let json = serde_json::to_value(CryptoBackend::Native(NativeCrypto::WinCrypt)).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "native", "api": "win_crypt" }));
  }

  #[test]
  fn none_is_distinct_from_openssl() {
    assert!(!CryptoBackend::None.uses_openssl());
    assert!(CryptoBackend::OpenSsl.uses_openssl());
    assert_eq!(CryptoBackend::None.to_string(), "none");
  }
}
