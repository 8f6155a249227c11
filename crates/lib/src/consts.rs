//! Constants shared across the crate.

pub const APP_NAME: &str = "kitconf";

/// Name of the project the descriptor describes.
pub const DEFAULT_PROJECT_NAME: &str = "kitgit";

/// Default root of the application's own sources.
pub const DEFAULT_APP_ROOT: &str = "Sources";

/// Default root of the vendored library checkout.
pub const DEFAULT_LIB_ROOT: &str = "libgit2";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "kitconf.toml";

/// Config file looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = "config.toml";

pub const ENV_PLATFORM: &str = "KITCONF_PLATFORM";
pub const ENV_PROFILE: &str = "KITCONF_PROFILE";

/// Length of the truncated descriptor fingerprint.
pub const FINGERPRINT_LEN: usize = 20;
