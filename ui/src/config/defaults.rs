/// Default base configuration file embedded in the binary
pub const DEFAULT_CONFIG: &str = include_str!("../../../config.default.toml");

/// Editor data directory under the platform config dir.
pub const EDITOR_DIR_NAME: &str = "sublime-text";

pub const PACKAGES_DIR_NAME: &str = "Packages";
pub const INSTALLED_PACKAGES_DIR_NAME: &str = "Installed Packages";

/// Package holding user settings files.
pub const USER_PACKAGE: &str = "User";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Prefix of environment overrides, e.g. `SCHEMR__LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "SCHEMR";
