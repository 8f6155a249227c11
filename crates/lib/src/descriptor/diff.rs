//! Differences between two resolved descriptors.
//!
//! Used to make profile divergences visible: resolving the same platform under
//! two profiles and diffing the results shows exactly which defines, files and
//! libraries a profile switch changes.

use serde::Serialize;

use super::types::{BuildDescriptor, Define, FileGroup, IncludeDir, LinkLib};
use crate::crypto::CryptoBackend;

/// A define present on both sides with different values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedDefine {
  pub name: String,
  pub from: Option<String>,
  pub to: Option<String>,
}

/// Entries present only on one side, per category.
///
/// "Added" means present in the second descriptor but not the first.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorDiff {
  pub file_groups_added: Vec<FileGroup>,
  pub file_groups_removed: Vec<FileGroup>,
  pub defines_added: Vec<Define>,
  pub defines_removed: Vec<Define>,
  pub defines_changed: Vec<ChangedDefine>,
  pub include_dirs_added: Vec<IncludeDir>,
  pub include_dirs_removed: Vec<IncludeDir>,
  pub libs_added: Vec<LinkLib>,
  pub libs_removed: Vec<LinkLib>,
  /// Set when the crypto backend differs: `(from, to)`.
  pub crypto: Option<(CryptoBackend, CryptoBackend)>,
}

impl DescriptorDiff {
  /// Returns true if both descriptors carry the same entries.
  pub fn is_empty(&self) -> bool {
    self.change_count() == 0 && self.crypto.is_none()
  }

  /// Total number of entry-level changes.
  pub fn change_count(&self) -> usize {
    self.file_groups_added.len()
      + self.file_groups_removed.len()
      + self.defines_added.len()
      + self.defines_removed.len()
      + self.defines_changed.len()
      + self.include_dirs_added.len()
      + self.include_dirs_removed.len()
      + self.libs_added.len()
      + self.libs_removed.len()
  }
}

/// Compute what changes going from `from` to `to`.
///
/// Entries are reported in the order they appear in their own descriptor.
/// Name, layout and platform are not compared; include-dir reordering without
/// membership change is not reported.
pub fn diff_descriptors(from: &BuildDescriptor, to: &BuildDescriptor) -> DescriptorDiff {
  let mut diff = DescriptorDiff {
    file_groups_added: only_in(&to.file_groups, &from.file_groups),
    file_groups_removed: only_in(&from.file_groups, &to.file_groups),
    include_dirs_added: only_in(&to.include_dirs, &from.include_dirs),
    include_dirs_removed: only_in(&from.include_dirs, &to.include_dirs),
    libs_added: only_in(&to.libs, &from.libs),
    libs_removed: only_in(&from.libs, &to.libs),
    ..Default::default()
  };

  for define in &to.defines {
    match from.define(&define.name) {
      None => diff.defines_added.push(define.clone()),
      Some(old) if old.value != define.value => diff.defines_changed.push(ChangedDefine {
        name: define.name.clone(),
        from: old.value.clone(),
        to: define.value.clone(),
      }),
      Some(_) => {}
    }
  }
  for define in &from.defines {
    if !to.has_define(&define.name) {
      diff.defines_removed.push(define.clone());
    }
  }

  if from.crypto != to.crypto {
    diff.crypto = Some((from.crypto, to.crypto));
  }

  diff
}

fn only_in<T: PartialEq + Clone>(side: &[T], other: &[T]) -> Vec<T> {
  side.iter().filter(|item| !other.contains(item)).cloned().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptor::{DescriptorBuilder, Layout, SourceRoot};
  use crate::platform::Platform;
  use crate::profile::Profile;

  fn descriptor(defines: &[&str], libs: &[&str], crypto: CryptoBackend) -> BuildDescriptor {
    DescriptorBuilder::new("demo", Layout::default())
      .lib_files(&["src/*.c"])
      .include_dir(SourceRoot::Library, "src")
      .defines(defines)
      .link(libs)
      .finish(Platform::MacOs, Profile::Native, crypto)
  }

  #[test]
  fn identical_descriptors_have_empty_diff() {
    let a = descriptor(&["STDC"], &["Security"], CryptoBackend::OpenSsl);
    let diff = diff_descriptors(&a, &a.clone());
    assert!(diff.is_empty());
    assert_eq!(diff.change_count(), 0);
  }

  #[test]
  fn libs_and_defines_are_split_into_added_and_removed() {
    let a = descriptor(&["GIT_SECURE_TRANSPORT", "STDC"], &["CoreFoundation", "Security"], CryptoBackend::None);
    let b = descriptor(&["STDC", "GIT_SSL"], &["libcrypto.dylib"], CryptoBackend::OpenSsl);
    let diff = diff_descriptors(&a, &b);

    assert_eq!(diff.defines_added, vec![Define::new("GIT_SSL")]);
    assert_eq!(diff.defines_removed, vec![Define::new("GIT_SECURE_TRANSPORT")]);
    assert_eq!(diff.libs_added, vec![LinkLib("libcrypto.dylib".to_string())]);
    assert_eq!(diff.libs_removed.len(), 2);
    assert_eq!(diff.crypto, Some((CryptoBackend::None, CryptoBackend::OpenSsl)));
    assert!(diff.file_groups_added.is_empty());
  }

  #[test]
  fn value_change_is_reported_as_changed() {
    let a = descriptor(&["_WIN32_WINNT=0x0501"], &[], CryptoBackend::None);
    let b = descriptor(&["_WIN32_WINNT=0x0601"], &[], CryptoBackend::None);
    let diff = diff_descriptors(&a, &b);
    assert_eq!(
      diff.defines_changed,
      vec![ChangedDefine {
        name: "_WIN32_WINNT".to_string(),
        from: Some("0x0501".to_string()),
        to: Some("0x0601".to_string()),
      }]
    );
    assert!(diff.defines_added.is_empty() && diff.defines_removed.is_empty());
  }
}
