use config::{Config, Environment, File, FileFormat};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub mod app;
pub mod defaults;
pub mod setup;
pub mod validation;

pub use app::AppConfig;
pub use validation::{ConfigLoadResult, ConfigValidationError};

use crate::error::{AppError, AppResult};
use defaults::{DEFAULT_CONFIG, DEFAULT_LOG_LEVEL, ENV_PREFIX};

/// Loads the layered configuration.
///
/// Layers, lowest priority first: the embedded defaults, the user file in
/// the standard config directory (optional), the file given with `--config`
/// (required when given), then `SCHEMR__SECTION__KEY` environment variables.
pub fn load_config(explicit: Option<&Path>) -> ConfigLoadResult {
    let user_file = setup::get_config_file_path().ok();
    load_config_from(user_file.as_deref(), explicit)
}

/// [`load_config`] with an explicit user file location.
pub fn load_config_from(user_file: Option<&Path>, explicit: Option<&Path>) -> ConfigLoadResult {
    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("catalog.noise_filters");

    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    if let Some(path) = user_file {
        builder = builder.add_source(File::from(path.to_path_buf()).required(false));
    }
    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path.to_path_buf()).required(true));
    }

    let config = match builder.add_source(env_source).build() {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => {
            if let Err(validation_errors) = app_config.validate() {
                let error_messages: Vec<String> =
                    validation_errors.iter().map(|e| e.user_message()).collect();
                return ConfigLoadResult::DeserializeError(format!(
                    "Configuration validation failed:\n{}",
                    error_messages.join("\n\n")
                ));
            }
            ConfigLoadResult::Success(Box::new(app_config))
        }
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

impl ConfigLoadResult {
    pub fn into_result(self) -> AppResult<AppConfig> {
        match self {
            ConfigLoadResult::Success(config) => Ok(*config),
            ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => {
                Err(AppError::Config(msg))
            }
        }
    }
}

/// `[logging]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.level().to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Warn,
        }
    }

    pub fn file(&self) -> Option<PathBuf> {
        self.file.as_deref().map(setup::expand_home)
    }
}
