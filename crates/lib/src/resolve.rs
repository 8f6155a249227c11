//! The configuration resolver.
//!
//! [`resolve`] maps a platform and a profile to a [`BuildDescriptor`] in one
//! pass: a fixed baseline, exactly one platform branch, then the compression
//! dependency. The function is pure; the same inputs always produce equal
//! descriptors.
//!
//! # Example
//!
//! ```
//! use kitconf_lib::platform::Platform;
//! use kitconf_lib::profile::Profile;
//! use kitconf_lib::resolve::resolve;
//!
//! let descriptor = resolve(Platform::Windows, Profile::Native);
//! assert!(descriptor.has_define("_WIN32_WINNT"));
//! assert!(descriptor.has_lib("Winhttp"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_PROJECT_NAME;
use crate::crypto::{CryptoBackend, NativeCrypto};
use crate::descriptor::{BuildDescriptor, DescriptorBuilder, Layout, OsLayer, SourceRoot};
use crate::platform::Platform;
use crate::profile::{MacSsl, Profile, ProfileRules, UnixCrypto};

/// A (platform, profile) pair, written `platform[:profile]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
  pub platform: Platform,
  pub profile: Profile,
}

impl Target {
  pub fn new(platform: Platform, profile: Profile) -> Self {
    Self { platform, profile }
  }

  /// Parse `platform[:profile]`. A missing profile is `default_profile`;
  /// unknown names fall back like [`Platform::from_name`] and
  /// [`Profile::from_name`].
  pub fn parse(spec: &str, default_profile: Profile) -> Self {
    match spec.split_once(':') {
      Some((platform, profile)) => Self::new(Platform::from_name(platform), Profile::from_name(profile)),
      None => Self::new(Platform::from_name(spec), default_profile),
    }
  }

  pub fn resolve(&self, layout: &Layout) -> BuildDescriptor {
    resolve_with(self.platform, self.profile, layout)
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.platform, self.profile)
  }
}

/// Resolve a descriptor using the default source layout.
pub fn resolve(platform: Platform, profile: Profile) -> BuildDescriptor {
  resolve_with(platform, profile, &Layout::default())
}

/// Resolve a descriptor for the given source layout.
pub fn resolve_with(platform: Platform, profile: Profile, layout: &Layout) -> BuildDescriptor {
  resolve_named(DEFAULT_PROJECT_NAME, platform, profile, layout)
}

/// Resolve a descriptor for a project with a custom name.
pub fn resolve_named(name: &str, platform: Platform, profile: Profile, layout: &Layout) -> BuildDescriptor {
  let rules = profile.rules();
  debug!(%platform, %profile, "resolving build descriptor");

  let builder = baseline(DescriptorBuilder::new(name, layout.clone()));
  let (builder, crypto) = match platform {
    Platform::Windows => windows(builder, &rules),
    Platform::MacOs | Platform::Unix => non_windows(builder, platform, &rules),
  };
  let descriptor = compression(builder).finish(platform, profile, crypto);

  debug_assert_eq!(descriptor.verify(), Ok(()), "resolver produced a malformed descriptor");
  debug!(
    %crypto,
    file_groups = descriptor.file_groups().len(),
    defines = descriptor.defines().len(),
    libs = descriptor.libs().len(),
    "resolved build descriptor"
  );
  descriptor
}

/// Application sources, library core, and the HTTP parser.
fn baseline(builder: DescriptorBuilder) -> DescriptorBuilder {
  let lib_git_dir = builder.layout().join(SourceRoot::Library, ".git/**");
  builder
    .exclude(".git/**")
    .exclude(lib_git_dir)
    .exclude("build/**")
    .files(SourceRoot::App, &["**"])
    .lib_files(&[
      "src/*.c",
      "src/*.h",
      "src/transports/*.c",
      "src/transports/*.h",
      "src/xdiff/*.c",
      "src/xdiff/*.h",
    ])
    .include_dirs(SourceRoot::Library, &["src", "include"])
    .include_dir(SourceRoot::Library, "deps/http-parser")
    .lib_files(&["deps/http-parser/*.c", "deps/http-parser/*.h"])
}

fn windows(builder: DescriptorBuilder, rules: &ProfileRules) -> (DescriptorBuilder, CryptoBackend) {
  debug!(
    threads = rules.windows_threads,
    system_libs = rules.windows_system_libs,
    "applying windows rules"
  );

  let mut builder = builder
    .os_layer(OsLayer::Win32, &["src/win32/*.c", "src/win32/*.h"])
    .defines(&["WIN32", "_WIN32_WINNT=0x0501"])
    .define("GIT_WINHTTP");

  if rules.windows_threads {
    builder = builder.define("GIT_THREADS");
  }

  builder = builder
    .define("WIN32_SHA1")
    .lib_files(&["src/hash/hash_win32.c"])
    .include_dir(SourceRoot::Library, "deps/regex")
    .lib_files(&["deps/regex/regex.c"]);

  if rules.windows_system_libs {
    builder = builder.link(&["Crypt32", "Winhttp", "Rpcrt4"]);
  }

  (builder, CryptoBackend::Native(NativeCrypto::WinCrypt))
}

/// Shared parent of the macOS and generic Unix branches.
fn non_windows(
  builder: DescriptorBuilder,
  platform: Platform,
  rules: &ProfileRules,
) -> (DescriptorBuilder, CryptoBackend) {
  let (builder, crypto) = match platform {
    Platform::MacOs => macos(builder, rules),
    _ => unix(builder, rules),
  };
  let builder = builder.os_layer(OsLayer::Unix, &["src/unix/*.c", "src/unix/*.h"]);
  (builder, crypto)
}

fn macos(builder: DescriptorBuilder, rules: &ProfileRules) -> (DescriptorBuilder, CryptoBackend) {
  debug!(ssl = %rules.macos_ssl, "applying macos rules");

  let builder = builder.define("GIT_COMMON_CRYPTO");
  match rules.macos_ssl {
    MacSsl::SecureTransport => (
      builder
        .define("GIT_SECURE_TRANSPORT")
        .link(&["CoreFoundation", "Security"]),
      CryptoBackend::Native(NativeCrypto::SecureTransport),
    ),
    MacSsl::OpenSsl => (
      builder
        .define("GIT_SSL")
        .link(&["libcrypto.dylib", "libssl.dylib"]),
      CryptoBackend::OpenSsl,
    ),
  }
}

fn unix(builder: DescriptorBuilder, rules: &ProfileRules) -> (DescriptorBuilder, CryptoBackend) {
  debug!(
    crypto = %rules.unix_crypto,
    ssl_define = rules.unix_ssl_define,
    ssl_libs = rules.unix_ssl_libs,
    "applying unix rules"
  );

  let (mut builder, crypto) = match rules.unix_crypto {
    UnixCrypto::OpenSsl => (builder.defines(&["GIT_OPENSSL", "OPENSSL_SHA1"]), CryptoBackend::OpenSsl),
    UnixCrypto::Generic => (generic_sha1(builder), CryptoBackend::None),
    UnixCrypto::GenericWithOpenSsl => (generic_sha1(builder.define("GIT_OPENSSL")), CryptoBackend::OpenSsl),
  };

  if rules.unix_ssl_define {
    builder = builder.define("GIT_SSL");
  }
  if rules.unix_ssl_libs {
    builder = builder.link(&["ssl", "crypto"]);
  }

  (builder, crypto)
}

fn generic_sha1(builder: DescriptorBuilder) -> DescriptorBuilder {
  builder.define("GENERIC_SHA1").lib_files(&["src/hash/hash_generic.c"])
}

/// zlib, built without gzip file support or the visibility extensions.
fn compression(builder: DescriptorBuilder) -> DescriptorBuilder {
  builder
    .include_dir(SourceRoot::Library, "deps/zlib")
    .defines(&["NO_VIZ", "STDC", "NO_GZIP"])
    .lib_files(&["deps/zlib/*.c", "deps/zlib/*.h"])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptor::Define;

  fn names(descriptor: &BuildDescriptor) -> Vec<String> {
    descriptor.defines().iter().map(Define::to_string).collect()
  }

  #[test]
  fn windows_native_matches_rule_order() {
    let descriptor = resolve(Platform::Windows, Profile::Native);
    assert_eq!(
      names(&descriptor),
      vec![
        "WIN32",
        "_WIN32_WINNT=0x0501",
        "GIT_WINHTTP",
        "GIT_THREADS",
        "WIN32_SHA1",
        "NO_VIZ",
        "STDC",
        "NO_GZIP"
      ]
    );
    assert_eq!(
      descriptor.include_paths(),
      vec![
        "libgit2/src",
        "libgit2/include",
        "libgit2/deps/http-parser",
        "libgit2/deps/regex",
        "libgit2/deps/zlib"
      ]
    );
    let libs: Vec<_> = descriptor.libs().iter().map(|l| l.as_str()).collect();
    assert_eq!(libs, vec!["Crypt32", "Winhttp", "Rpcrt4"]);
    assert_eq!(descriptor.crypto(), CryptoBackend::Native(NativeCrypto::WinCrypt));
    assert!(descriptor.has_file_group(SourceRoot::Library, "src/hash/hash_win32.c"));
    assert!(descriptor.has_file_group(SourceRoot::Library, "deps/regex/regex.c"));
  }

  #[test]
  fn windows_link_defaults_has_no_threads_and_no_libs() {
    let descriptor = resolve(Platform::Windows, Profile::LinkDefaults);
    assert!(!descriptor.has_define("GIT_THREADS"));
    assert!(descriptor.libs().is_empty());
    assert!(descriptor.has_define("WIN32_SHA1"));
  }

  #[test]
  fn windows_transitional_keeps_threads_without_libs() {
    let descriptor = resolve(Platform::Windows, Profile::Transitional);
    assert!(descriptor.has_define("GIT_THREADS"));
    assert!(descriptor.libs().is_empty());
  }

  #[test]
  fn macos_native_uses_frameworks() {
    let descriptor = resolve(Platform::MacOs, Profile::Native);
    assert!(descriptor.has_define("GIT_COMMON_CRYPTO"));
    assert!(descriptor.has_define("GIT_SECURE_TRANSPORT"));
    assert!(!descriptor.has_define("GIT_SSL"));
    assert!(descriptor.has_lib("CoreFoundation") && descriptor.has_lib("Security"));
    assert_eq!(descriptor.crypto(), CryptoBackend::Native(NativeCrypto::SecureTransport));
  }

  #[test]
  fn macos_portable_ssl_links_dylibs_behind_ssl_define() {
    let descriptor = resolve(Platform::MacOs, Profile::PortableSsl);
    assert!(descriptor.has_define("GIT_SSL"));
    assert!(!descriptor.has_define("GIT_SECURE_TRANSPORT"));
    let libs: Vec<_> = descriptor.libs().iter().map(|l| l.as_str()).collect();
    assert_eq!(libs, vec!["libcrypto.dylib", "libssl.dylib"]);
    assert_eq!(descriptor.crypto(), CryptoBackend::OpenSsl);
  }

  #[test]
  fn unix_native_selects_openssl_sha1() {
    let descriptor = resolve(Platform::Unix, Profile::Native);
    assert!(descriptor.has_define("GIT_OPENSSL"));
    assert_eq!(descriptor.sha1_selectors(), vec!["OPENSSL_SHA1"]);
    assert!(descriptor.libs().is_empty());
    assert!(!descriptor.has_file_group(SourceRoot::Library, "src/hash/hash_generic.c"));
  }

  #[test]
  fn unix_link_defaults_uses_generic_sha1_without_ssl() {
    let descriptor = resolve(Platform::Unix, Profile::LinkDefaults);
    assert!(!descriptor.has_define("GIT_OPENSSL"));
    assert_eq!(descriptor.sha1_selectors(), vec!["GENERIC_SHA1"]);
    assert!(descriptor.has_file_group(SourceRoot::Library, "src/hash/hash_generic.c"));
    assert_eq!(descriptor.crypto(), CryptoBackend::None);
  }

  #[test]
  fn unix_transitional_pairs_generic_sha1_with_openssl_libs() {
    let descriptor = resolve(Platform::Unix, Profile::Transitional);
    assert!(descriptor.has_define("GIT_OPENSSL"));
    assert_eq!(descriptor.sha1_selectors(), vec!["GENERIC_SHA1"]);
    assert!(descriptor.has_lib("ssl") && descriptor.has_lib("crypto"));
    assert_eq!(descriptor.crypto(), CryptoBackend::OpenSsl);
  }

  #[test]
  fn unix_portable_ssl_adds_ssl_define_and_libs() {
    let descriptor = resolve(Platform::Unix, Profile::PortableSsl);
    assert!(descriptor.has_define("GIT_SSL"));
    assert!(descriptor.has_lib("ssl"));
    assert_eq!(descriptor.sha1_selectors(), vec!["OPENSSL_SHA1"]);
  }

  #[test]
  fn unix_layer_comes_after_crypto_selection() {
    let descriptor = resolve(Platform::Unix, Profile::LinkDefaults);
    let paths = descriptor.file_paths();
    let generic = paths.iter().position(|p| p.ends_with("hash_generic.c")).unwrap();
    let layer = paths.iter().position(|p| p == "libgit2/src/unix/*.c").unwrap();
    assert!(generic < layer);
  }

  #[test]
  fn compression_comes_last() {
    for platform in Platform::ALL {
      let descriptor = resolve(platform, Profile::Native);
      let paths = descriptor.file_paths();
      assert_eq!(&paths[paths.len() - 2..], ["libgit2/deps/zlib/*.c", "libgit2/deps/zlib/*.h"]);
      assert_eq!(descriptor.include_paths().last().map(String::as_str), Some("libgit2/deps/zlib"));
    }
  }

  #[test]
  fn excludes_follow_library_root() {
    let layout = Layout::new("app", "vendor/libgit2");
    let descriptor = resolve_with(Platform::Unix, Profile::Native, &layout);
    assert_eq!(descriptor.excludes(), [".git/**", "vendor/libgit2/.git/**", "build/**"]);
    assert_eq!(descriptor.file_paths()[0], "app/**");
  }

  #[test]
  fn empty_roots_keep_excludes_relative() {
    let descriptor = resolve_with(Platform::Unix, Profile::Native, &Layout::new("", ""));
    assert_eq!(descriptor.excludes(), [".git/**", "build/**"]);
    assert!(descriptor.excludes().iter().all(|e| !e.starts_with('/')));

    let trailing = resolve_with(Platform::Unix, Profile::Native, &Layout::new("app", "vendor/"));
    assert_eq!(trailing.excludes()[1], "vendor/.git/**");
  }

  #[test]
  fn target_parses_platform_and_profile() {
    let target = Target::parse("osx:portable_ssl", Profile::Native);
    assert_eq!(target, Target::new(Platform::MacOs, Profile::PortableSsl));
    assert_eq!(target.to_string(), "macos:portable-ssl");

    let bare = Target::parse("windows", Profile::LinkDefaults);
    assert_eq!(bare, Target::new(Platform::Windows, Profile::LinkDefaults));
  }

  #[test]
  fn custom_name_is_carried() {
    let descriptor = resolve_named("mirror", Platform::Unix, Profile::Native, &Layout::default());
    assert_eq!(descriptor.name(), "mirror");
    assert_eq!(resolve(Platform::Unix, Profile::Native).name(), "kitgit");
  }
}
