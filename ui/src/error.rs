use crate::config::ConfigValidationError;
use crate::config::setup::SetupError;
use engine::SchemeError;
use std::fmt::Display;

/// Application-wide error types for the schemr command line.
///
/// # Error Categories
///
/// - [`Scheme`] - catalog, selection and favorites failures from the engine
/// - [`Config`] - configuration loading and validation errors
/// - [`Settings`] - settings files that cannot be read or written
/// - [`Io`] - terminal and file system failures
///
/// Engine errors convert automatically, so command handlers can use `?` on
/// [`engine::SchemeResult`] values:
///
/// ```no_run
/// use schemr::error::AppResult;
/// use engine::SchemeManager;
/// # use engine::lister::BuiltinLister;
/// # use engine::settings::{MemorySettings, Scope};
/// # use engine::selector::{CycleFilter, Direction};
///
/// fn next_scheme(manager: &mut SchemeManager<BuiltinLister, MemorySettings>) -> AppResult<String> {
///     let entry = manager.cycle(&Scope::Global, Direction::Next, &CycleFilter::default())?;
///     Ok(entry.label())
/// }
/// ```
///
/// [`Scheme`]: AppError::Scheme
/// [`Config`]: AppError::Config
/// [`Settings`]: AppError::Settings
/// [`Io`]: AppError::Io
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Engine failures. `EmptyCatalog` is the one users hit most: no scheme
    /// matched the requested filter.
    Scheme(String),

    /// Configuration files, environment overrides or command-line values
    /// that cannot be used.
    Config(String),

    /// Settings files that are unreadable, malformed or cannot be written.
    Settings(String),

    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Scheme(msg) => write!(f, "Scheme Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Settings(msg) => write!(f, "Settings Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SchemeError> for AppError {
    fn from(err: SchemeError) -> Self {
        match err {
            SchemeError::Settings(msg) => AppError::Settings(msg),
            SchemeError::InvalidPattern { .. } | SchemeError::InvalidDirection(_) => {
                AppError::Config(err.to_string())
            }
            other => AppError::Scheme(other.to_string()),
        }
    }
}

impl From<SetupError> for AppError {
    fn from(err: SetupError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<ConfigValidationError> for AppError {
    fn from(err: ConfigValidationError) -> Self {
        AppError::Config(err.user_message())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
