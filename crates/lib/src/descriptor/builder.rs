use tracing::debug;

use super::types::{BuildDescriptor, Define, FileGroup, IncludeDir, Layout, LinkLib, OsLayer, SourceRoot, Subsystem};
use crate::crypto::CryptoBackend;
use crate::platform::Platform;
use crate::profile::Profile;

/// Accumulates descriptor entries by value.
///
/// Every method consumes the builder and returns the extended one, so a
/// partially built descriptor can be cloned and branched without any shared
/// state. Exact duplicate file groups, include dirs and libs are dropped; a
/// repeated define name keeps its first position and takes the last value.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
  name: String,
  layout: Layout,
  excludes: Vec<String>,
  file_groups: Vec<FileGroup>,
  defines: Vec<Define>,
  include_dirs: Vec<IncludeDir>,
  libs: Vec<LinkLib>,
}

impl DescriptorBuilder {
  pub fn new(name: impl Into<String>, layout: Layout) -> Self {
    Self {
      name: name.into(),
      layout,
      excludes: Vec::new(),
      file_groups: Vec::new(),
      defines: Vec::new(),
      include_dirs: Vec::new(),
      libs: Vec::new(),
    }
  }

  pub fn layout(&self) -> &Layout {
    &self.layout
  }

  pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
    let pattern = pattern.into();
    if !self.excludes.contains(&pattern) {
      self.excludes.push(pattern);
    }
    self
  }

  pub fn files(self, root: SourceRoot, patterns: &[&str]) -> Self {
    patterns
      .iter()
      .fold(self, |builder, pattern| builder.file_group(FileGroup::new(root, *pattern)))
  }

  /// Add vendored-library file groups.
  pub fn lib_files(self, patterns: &[&str]) -> Self {
    self.files(SourceRoot::Library, patterns)
  }

  /// Add vendored-library file groups tagged as an OS layer.
  pub fn os_layer(self, layer: OsLayer, patterns: &[&str]) -> Self {
    patterns.iter().fold(self, |builder, pattern| {
      builder.file_group(FileGroup {
        root: SourceRoot::Library,
        pattern: pattern.to_string(),
        layer: Some(layer),
      })
    })
  }

  pub fn file_group(mut self, group: FileGroup) -> Self {
    if self.file_groups.contains(&group) {
      debug!(pattern = %group.pattern, "dropping duplicate file group");
    } else {
      self.file_groups.push(group);
    }
    self
  }

  pub fn include_dir(mut self, root: SourceRoot, path: &str) -> Self {
    let dir = IncludeDir::new(root, path);
    if self.include_dirs.contains(&dir) {
      debug!(path, "dropping duplicate include dir");
    } else {
      self.include_dirs.push(dir);
    }
    self
  }

  pub fn include_dirs(self, root: SourceRoot, paths: &[&str]) -> Self {
    paths.iter().fold(self, |builder, path| builder.include_dir(root, path))
  }

  pub fn define(mut self, define: impl Into<Define>) -> Self {
    let define = define.into();
    match self.defines.iter_mut().find(|d| d.name == define.name) {
      Some(existing) => {
        debug!(name = %define.name, "define repeated, last value wins");
        existing.value = define.value;
      }
      None => self.defines.push(define),
    }
    self
  }

  pub fn defines(self, raw: &[&str]) -> Self {
    raw.iter().fold(self, |builder, define| builder.define(*define))
  }

  pub fn link(mut self, libs: &[&str]) -> Self {
    for lib in libs {
      let lib = LinkLib(lib.to_string());
      if self.libs.contains(&lib) {
        debug!(lib = %lib, "dropping duplicate link library");
      } else {
        self.libs.push(lib);
      }
    }
    self
  }

  /// Seal the accumulated entries into a descriptor.
  pub fn finish(self, platform: Platform, profile: Profile, crypto: CryptoBackend) -> BuildDescriptor {
    BuildDescriptor {
      name: self.name,
      subsystem: Subsystem::Console,
      platform,
      profile,
      crypto,
      layout: self.layout,
      excludes: self.excludes,
      file_groups: self.file_groups,
      defines: self.defines,
      include_dirs: self.include_dirs,
      libs: self.libs,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn builder() -> DescriptorBuilder {
    DescriptorBuilder::new("demo", Layout::default())
  }

  fn finish(builder: DescriptorBuilder) -> BuildDescriptor {
    builder.finish(Platform::Unix, Profile::Native, CryptoBackend::None)
  }

  #[test]
  fn repeated_define_keeps_position_and_takes_last_value() {
    let descriptor = finish(builder().defines(&["A=1", "B", "A=2"]));
    let rendered: Vec<_> = descriptor.defines().iter().map(|d| d.to_string()).collect();
    assert_eq!(rendered, vec!["A=2", "B"]);
  }

  #[test]
  fn duplicate_entries_are_dropped() {
    let descriptor = finish(
      builder()
        .lib_files(&["src/*.c", "src/*.c"])
        .include_dirs(SourceRoot::Library, &["src", "src"])
        .link(&["ssl", "ssl"])
        .exclude("build/**")
        .exclude("build/**"),
    );
    assert_eq!(descriptor.file_groups().len(), 1);
    assert_eq!(descriptor.include_dirs().len(), 1);
    assert_eq!(descriptor.libs().len(), 1);
    assert_eq!(descriptor.excludes().len(), 1);
  }

  #[test]
  fn descriptor_is_a_console_application() {
    assert_eq!(finish(builder()).subsystem(), Subsystem::Console);
  }

  #[test]
  fn same_pattern_under_different_roots_is_kept() {
    let descriptor = finish(builder().files(SourceRoot::App, &["**"]).lib_files(&["**"]));
    assert_eq!(descriptor.file_groups().len(), 2);
  }

  #[test]
  fn branches_from_a_shared_prefix_are_independent() {
    let base = builder().define("SHARED");
    let left = finish(base.clone().define("LEFT"));
    let right = finish(base.define("RIGHT"));
    assert!(left.has_define("LEFT") && !left.has_define("RIGHT"));
    assert!(right.has_define("RIGHT") && !right.has_define("LEFT"));
  }

  #[test]
  fn insertion_order_is_preserved() {
    let descriptor = finish(builder().include_dirs(SourceRoot::Library, &["src", "include", "deps/zlib"]));
    assert_eq!(
      descriptor.include_paths(),
      vec!["libgit2/src", "libgit2/include", "libgit2/deps/zlib"]
    );
  }

  #[test]
  fn os_layer_groups_are_tagged() {
    let descriptor = finish(builder().os_layer(OsLayer::Unix, &["src/unix/*.c", "src/unix/*.h"]));
    assert!(descriptor.file_groups().iter().all(|g| g.layer == Some(OsLayer::Unix)));
    assert_eq!(descriptor.os_layer(), Some(OsLayer::Unix));
  }
}
