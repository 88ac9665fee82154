use super::app::AppConfig;
use crate::validation::Validator;

/// Lowest accepted brightness threshold (luminance of black).
pub const MIN_BRIGHTNESS_THRESHOLD: f64 = 0.0;
/// Highest accepted brightness threshold (luminance of white).
pub const MAX_BRIGHTNESS_THRESHOLD: f64 = 255.0;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid brightness_threshold: {configured} (min: {min_limit}, max: {max_limit})")]
    BrightnessThreshold {
        configured: f64,
        min_limit: f64,
        max_limit: f64,
    },
    #[error("Invalid noise filter '{pattern}': {reason}")]
    NoisePattern { pattern: String, reason: String },
    #[error("Invalid log level: {configured}")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::BrightnessThreshold {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Brightness threshold out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update brightness_threshold in the [catalog] section of config.toml."
                )
            }
            ConfigValidationError::NoisePattern { pattern, reason } => {
                format!(
                    "Noise filter is not a valid regular expression!\n\n\
                    Pattern: {pattern}\n\
                    Problem: {reason}\n\n\
                    Please fix noise_filters in the [catalog] section of config.toml."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown log level '{configured}'.\n\n\
                    Use one of: {}.",
                    LOG_LEVELS.join(", ")
                )
            }
        }
    }
}

/// Validator for luminance thresholds
pub struct ThresholdValidator;

impl Validator<f64> for ThresholdValidator {
    type Error = ConfigValidationError;

    fn validate(&self, input: &f64) -> Result<(), Self::Error> {
        if !input.is_finite() || *input < MIN_BRIGHTNESS_THRESHOLD || *input > MAX_BRIGHTNESS_THRESHOLD
        {
            return Err(ConfigValidationError::BrightnessThreshold {
                configured: *input,
                min_limit: MIN_BRIGHTNESS_THRESHOLD,
                max_limit: MAX_BRIGHTNESS_THRESHOLD,
            });
        }
        Ok(())
    }
}

/// Validator for `[logging] level`
pub struct LogLevelValidator;

impl Validator<str> for LogLevelValidator {
    type Error = ConfigValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let level = input.to_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(ConfigValidationError::LogLevel {
                configured: input.to_string(),
            })
        }
    }
}

/// Configuration loading result
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
