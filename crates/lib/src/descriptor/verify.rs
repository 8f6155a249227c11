use super::types::{BuildDescriptor, OsLayer};

/// A structural invariant a resolved descriptor failed to uphold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
  #[error("descriptor has no file groups")]
  NoFileGroups,

  #[error("expected exactly one OS layer, found {found:?}")]
  OsLayer { found: Vec<OsLayer> },

  #[error("expected exactly one SHA1 selector define, found {found:?}")]
  Sha1Selector { found: Vec<String> },
}

impl BuildDescriptor {
  /// Check the invariants every resolved descriptor upholds.
  ///
  /// The crypto backend needs no check: a descriptor cannot be built
  /// without one.
  pub fn verify(&self) -> Result<(), DescriptorError> {
    if self.file_groups.is_empty() {
      return Err(DescriptorError::NoFileGroups);
    }

    let layers = self.os_layers();
    if layers.len() != 1 {
      return Err(DescriptorError::OsLayer { found: layers });
    }

    let selectors = self.sha1_selectors();
    if selectors.len() != 1 {
      return Err(DescriptorError::Sha1Selector {
        found: selectors.into_iter().map(str::to_string).collect(),
      });
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::crypto::CryptoBackend;
  use crate::descriptor::{DescriptorBuilder, Layout};
  use crate::platform::Platform;
  use crate::profile::Profile;

  fn finish(builder: DescriptorBuilder) -> BuildDescriptor {
    builder.finish(Platform::Unix, Profile::Native, CryptoBackend::OpenSsl)
  }

  fn base() -> DescriptorBuilder {
    DescriptorBuilder::new("demo", Layout::default())
  }

  #[test]
  fn empty_descriptor_is_rejected() {
    assert_eq!(finish(base()).verify(), Err(DescriptorError::NoFileGroups));
  }

  #[test]
  fn both_os_layers_are_rejected() {
    let descriptor = finish(
      base()
        .os_layer(OsLayer::Win32, &["src/win32/*.c"])
        .os_layer(OsLayer::Unix, &["src/unix/*.c"])
        .define("OPENSSL_SHA1"),
    );
    assert_eq!(
      descriptor.verify(),
      Err(DescriptorError::OsLayer {
        found: vec![OsLayer::Win32, OsLayer::Unix]
      })
    );
  }

  #[test]
  fn missing_os_layer_is_rejected() {
    let descriptor = finish(base().lib_files(&["src/*.c"]).define("OPENSSL_SHA1"));
    assert!(matches!(descriptor.verify(), Err(DescriptorError::OsLayer { .. })));
  }

  #[test]
  fn two_sha1_selectors_are_rejected() {
    let descriptor = finish(
      base()
        .os_layer(OsLayer::Unix, &["src/unix/*.c"])
        .defines(&["OPENSSL_SHA1", "GENERIC_SHA1"]),
    );
    let err = descriptor.verify().unwrap_err();
    assert_eq!(
      err.to_string(),
      r#"expected exactly one SHA1 selector define, found ["OPENSSL_SHA1", "GENERIC_SHA1"]"#
    );
  }

  #[test]
  fn well_formed_descriptor_passes() {
    let descriptor = finish(base().os_layer(OsLayer::Unix, &["src/unix/*.c"]).define("OPENSSL_SHA1"));
    assert_eq!(descriptor.verify(), Ok(()));
  }
}
