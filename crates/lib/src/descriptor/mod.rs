//! Build descriptor types.
//!
//! A [`BuildDescriptor`] is the resolved set of file groups, include
//! directories, preprocessor defines and link libraries for one platform and
//! profile. It is assembled through a [`DescriptorBuilder`], checked with
//! [`BuildDescriptor::verify`], and compared with [`diff_descriptors`].

mod builder;
mod diff;
mod types;
mod verify;

pub use builder::DescriptorBuilder;
pub use diff::{ChangedDefine, DescriptorDiff, diff_descriptors};
pub use types::*;
pub use verify::DescriptorError;
