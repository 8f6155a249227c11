//! kitconf-lib: platform-conditional build descriptors for kitgit
//!
//! This crate decides what a native build of kitgit and its vendored libgit2
//! needs on a given platform:
//! - `Platform` / `Profile`: the two inputs to resolution
//! - `BuildDescriptor`: file groups, include dirs, defines and link libraries
//! - `resolve`: the pure rule set mapping inputs to a descriptor
//! - `Settings`: layered selection of platform, profile and source layout

pub mod consts;
pub mod crypto;
pub mod descriptor;
pub mod platform;
pub mod profile;
pub mod resolve;
pub mod settings;
pub mod util;

pub use descriptor::BuildDescriptor;
pub use platform::Platform;
pub use profile::Profile;
pub use resolve::{Target, resolve, resolve_with};
pub use settings::{ConfigError, Settings, SettingsSources};
