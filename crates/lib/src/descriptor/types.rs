use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_APP_ROOT, DEFAULT_LIB_ROOT};
use crate::crypto::CryptoBackend;
use crate::platform::Platform;
use crate::profile::Profile;
use crate::util::hash::Hashable;

/// Defines that pick the SHA1 implementation. A resolved descriptor carries
/// exactly one of them.
pub const SHA1_SELECTORS: [&str; 4] = ["WIN32_SHA1", "GIT_COMMON_CRYPTO", "OPENSSL_SHA1", "GENERIC_SHA1"];

/// Which of the two source trees a path is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRoot {
  App,
  Library,
}

/// Directories of the application sources and the vendored library,
/// relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
  pub app_root: String,
  pub lib_root: String,
}

impl Default for Layout {
  fn default() -> Self {
    Self {
      app_root: DEFAULT_APP_ROOT.to_string(),
      lib_root: DEFAULT_LIB_ROOT.to_string(),
    }
  }
}

impl Layout {
  pub fn new(app_root: impl Into<String>, lib_root: impl Into<String>) -> Self {
    Self {
      app_root: app_root.into(),
      lib_root: lib_root.into(),
    }
  }

  pub fn root_dir(&self, root: SourceRoot) -> &str {
    match root {
      SourceRoot::App => &self.app_root,
      SourceRoot::Library => &self.lib_root,
    }
  }

  /// Join a root-relative path onto its root directory using `/`.
  pub fn join(&self, root: SourceRoot, relative: &str) -> String {
    let base = self.root_dir(root).trim_end_matches('/');
    match (base.is_empty(), relative.is_empty()) {
      (true, _) => relative.to_string(),
      (false, true) => base.to_string(),
      (false, false) => format!("{}/{}", base, relative),
    }
  }
}

/// Platform abstraction layer a file group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsLayer {
  Win32,
  Unix,
}

impl fmt::Display for OsLayer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Win32 => "win32",
      Self::Unix => "unix",
    })
  }
}

/// A glob pattern selecting source or header files under one root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileGroup {
  pub root: SourceRoot,
  pub pattern: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub layer: Option<OsLayer>,
}

impl FileGroup {
  pub fn new(root: SourceRoot, pattern: impl Into<String>) -> Self {
    Self {
      root,
      pattern: pattern.into(),
      layer: None,
    }
  }

  pub fn path(&self, layout: &Layout) -> String {
    layout.join(self.root, &self.pattern)
  }
}

/// A preprocessor definition, `NAME` or `NAME=value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Define {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<String>,
}

impl Define {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: None,
    }
  }

  pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: Some(value.into()),
    }
  }

  /// Split `NAME=value` at the first `=`.
  pub fn parse(raw: &str) -> Self {
    match raw.split_once('=') {
      Some((name, value)) => Self::with_value(name.trim(), value.trim()),
      None => Self::new(raw.trim()),
    }
  }
}

impl From<&str> for Define {
  fn from(raw: &str) -> Self {
    Define::parse(raw)
  }
}

impl fmt::Display for Define {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.value {
      Some(value) => write!(f, "{}={}", self.name, value),
      None => write!(f, "{}", self.name),
    }
  }
}

/// A header search directory under one root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncludeDir {
  pub root: SourceRoot,
  pub path: String,
}

impl IncludeDir {
  pub fn new(root: SourceRoot, path: impl Into<String>) -> Self {
    Self { root, path: path.into() }
  }

  pub fn path(&self, layout: &Layout) -> String {
    layout.join(self.root, &self.path)
  }
}

/// A library to link, by name or by file path. Passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkLib(pub String);

impl LinkLib {
  const FILE_SUFFIXES: [&'static str; 5] = [".dylib", ".so", ".a", ".lib", ".tbd"];

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// True when this names a library file rather than a library.
  pub fn is_file(&self) -> bool {
    self.0.contains(['/', '\\']) || Self::FILE_SUFFIXES.iter().any(|suffix| self.0.ends_with(suffix))
  }
}

impl fmt::Display for LinkLib {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Executable subsystem of the built application.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
  #[default]
  Console,
}

/// Everything a native build needs for one (platform, profile) pair.
///
/// Built once by the resolver through a [`DescriptorBuilder`] and immutable
/// afterwards. Every list keeps insertion order, which matters for include
/// path precedence.
///
/// [`DescriptorBuilder`]: super::DescriptorBuilder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
  pub(crate) name: String,
  pub(crate) subsystem: Subsystem,
  pub(crate) platform: Platform,
  pub(crate) profile: Profile,
  pub(crate) crypto: CryptoBackend,
  pub(crate) layout: Layout,
  pub(crate) excludes: Vec<String>,
  pub(crate) file_groups: Vec<FileGroup>,
  pub(crate) defines: Vec<Define>,
  pub(crate) include_dirs: Vec<IncludeDir>,
  pub(crate) libs: Vec<LinkLib>,
}

impl Hashable for BuildDescriptor {}

impl BuildDescriptor {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn subsystem(&self) -> Subsystem {
    self.subsystem
  }

  pub fn platform(&self) -> Platform {
    self.platform
  }

  pub fn profile(&self) -> Profile {
    self.profile
  }

  pub fn crypto(&self) -> CryptoBackend {
    self.crypto
  }

  pub fn layout(&self) -> &Layout {
    &self.layout
  }

  pub fn excludes(&self) -> &[String] {
    &self.excludes
  }

  pub fn file_groups(&self) -> &[FileGroup] {
    &self.file_groups
  }

  pub fn defines(&self) -> &[Define] {
    &self.defines
  }

  pub fn include_dirs(&self) -> &[IncludeDir] {
    &self.include_dirs
  }

  pub fn libs(&self) -> &[LinkLib] {
    &self.libs
  }

  pub fn define(&self, name: &str) -> Option<&Define> {
    self.defines.iter().find(|d| d.name == name)
  }

  pub fn has_define(&self, name: &str) -> bool {
    self.define(name).is_some()
  }

  pub fn has_lib(&self, name: &str) -> bool {
    self.libs.iter().any(|lib| lib.0 == name)
  }

  pub fn has_file_group(&self, root: SourceRoot, pattern: &str) -> bool {
    self.file_groups.iter().any(|g| g.root == root && g.pattern == pattern)
  }

  /// Distinct OS layers present, in first-seen order.
  pub fn os_layers(&self) -> Vec<OsLayer> {
    let mut layers = Vec::new();
    for layer in self.file_groups.iter().filter_map(|g| g.layer) {
      if !layers.contains(&layer) {
        layers.push(layer);
      }
    }
    layers
  }

  /// The single OS layer, if the descriptor is well formed.
  pub fn os_layer(&self) -> Option<OsLayer> {
    match self.os_layers().as_slice() {
      [layer] => Some(*layer),
      _ => None,
    }
  }

  /// SHA1 selector defines present, in insertion order.
  pub fn sha1_selectors(&self) -> Vec<&str> {
    self
      .defines
      .iter()
      .map(|d| d.name.as_str())
      .filter(|name| SHA1_SELECTORS.contains(name))
      .collect()
  }

  /// File group patterns rendered under their root directories.
  pub fn file_paths(&self) -> Vec<String> {
    self.file_groups.iter().map(|g| g.path(&self.layout)).collect()
  }

  /// Include directories rendered under their root directories.
  pub fn include_paths(&self) -> Vec<String> {
    self.include_dirs.iter().map(|d| d.path(&self.layout)).collect()
  }
}
