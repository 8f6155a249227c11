mod diff;
mod info;
mod profiles;
mod resolve;

pub use diff::cmd_diff;
pub use info::cmd_info;
pub use profiles::cmd_profiles;
pub use resolve::cmd_resolve;
