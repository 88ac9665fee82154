use super::defaults::{INSTALLED_PACKAGES_DIR_NAME, PACKAGES_DIR_NAME, USER_PACKAGE};
use super::setup::{editor_data_dir, expand_home};
use super::validation::{ConfigValidationError, LogLevelValidator, ThresholdValidator};
use super::LoggingConfig;
use crate::validation::Validator;
use engine::SchemeError;
use engine::brightness::DEFAULT_BRIGHTNESS_THRESHOLD;
use engine::catalog::{CatalogConfig, DEFAULT_NOISE_PATTERNS, NoiseFilter};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    catalog: CatalogSection,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = ThresholdValidator.validate(&self.catalog.brightness_threshold()) {
            errors.push(e);
        }

        for pattern in self.catalog.noise_filters() {
            if let Err(SchemeError::InvalidPattern { pattern, reason }) = NoiseFilter::new([&pattern]) {
                errors.push(ConfigValidationError::NoisePattern { pattern, reason });
            }
        }

        if let Err(e) = LogLevelValidator.validate(self.logging.level()) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    pub fn catalog(&self) -> &CatalogSection {
        &self.catalog
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Engine catalog options built from the `[catalog]` section.
    pub fn catalog_config(&self) -> Result<CatalogConfig, SchemeError> {
        Ok(CatalogConfig {
            brightness_flags: self.catalog.brightness_flags(),
            brightness_threshold: self.catalog.brightness_threshold(),
            noise_filters: NoiseFilter::new(self.catalog.noise_filters())?,
            ..CatalogConfig::default()
        })
    }
}

/// `[paths]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PathsConfig {
    packages_dir: Option<String>,
    installed_packages_dir: Option<String>,
    settings_dir: Option<String>,
}

impl PathsConfig {
    pub fn packages_dir(&self) -> PathBuf {
        match &self.packages_dir {
            Some(dir) => expand_home(dir),
            None => editor_data_dir()
                .map(|dir| dir.join(PACKAGES_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(PACKAGES_DIR_NAME)),
        }
    }

    pub fn installed_packages_dir(&self) -> PathBuf {
        match &self.installed_packages_dir {
            Some(dir) => expand_home(dir),
            None => editor_data_dir()
                .map(|dir| dir.join(INSTALLED_PACKAGES_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(INSTALLED_PACKAGES_DIR_NAME)),
        }
    }

    /// Defaults to the `User` package inside the packages directory.
    pub fn settings_dir(&self) -> PathBuf {
        match &self.settings_dir {
            Some(dir) => expand_home(dir),
            None => self.packages_dir().join(USER_PACKAGE),
        }
    }
}

/// `[catalog]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CatalogSection {
    brightness_flags: Option<bool>,
    brightness_threshold: Option<f64>,
    noise_filters: Option<Vec<String>>,
    preview_selection: Option<bool>,
    include_builtin: Option<bool>,
}

impl CatalogSection {
    pub fn brightness_flags(&self) -> bool {
        self.brightness_flags.unwrap_or(true)
    }

    pub fn brightness_threshold(&self) -> f64 {
        self.brightness_threshold
            .unwrap_or(DEFAULT_BRIGHTNESS_THRESHOLD)
    }

    pub fn noise_filters(&self) -> Vec<String> {
        match &self.noise_filters {
            Some(patterns) => patterns.clone(),
            None => DEFAULT_NOISE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn preview_selection(&self) -> bool {
        self.preview_selection.unwrap_or(true)
    }

    pub fn include_builtin(&self) -> bool {
        self.include_builtin.unwrap_or(true)
    }
}
