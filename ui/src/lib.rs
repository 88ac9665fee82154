//! # schemr
//!
//! Command-line front end for the scheme engine. It browses, previews,
//! favorites and cycles the color schemes of a Sublime-style editor
//! installation.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line arguments
//! - [`commands`] - Command execution against a [`engine::SchemeManager`]
//! - [`config`] - Layered configuration and first-run setup
//! - [`error`] - Application error type
//! - [`logger`] - Logging setup
//! - [`picker`] - Interactive quick panel with live preview
//! - [`scope`] - Syntax scope names from the command line
//! - [`settings_file`] - Settings store backed by `.sublime-settings` files
//! - [`validation`] - Validation trait shared by config and input checks
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod picker;
pub mod scope;
pub mod settings_file;
pub mod validation;

pub use error::{AppError, AppResult};
pub use validation::Validator;
