//! # Schemr Engine
//!
//! Core library for discovering, classifying and cycling through editor
//! color schemes. It is independent of any editor: themes are reached
//! through a [`lister::ResourceLister`] and preferences through a
//! [`settings::SettingsStore`].
//!
//! ## Modules
//!
//! - [`lister`] - Resource backends: loose directories, zipped bundles, built-in schemes
//! - [`parser`] - Background color extraction from `.tmTheme` property lists
//! - [`brightness`] - Luminance and Dark/Light classification
//! - [`catalog`] - Catalog construction with noise filtering and favorites
//! - [`favorites`] - Persisted favorites list
//! - [`selector`] - Next/previous/random cycling with stale selection recovery
//! - [`preview`] - Preview-then-commit picker sessions
//! - [`manager`] - Context object tying the pieces together
//! - [`settings`] - Settings store abstraction and scopes
//! - [`model`] - Catalog data types
//! - [`common`] - Error types

pub mod brightness;
pub mod catalog;
pub mod common;
pub mod favorites;
pub mod lister;
pub mod manager;
pub mod model;
pub mod parser;
pub mod preview;
pub mod selector;
pub mod settings;

pub use common::{ParseError, SchemeError, SchemeResult};
pub use manager::SchemeManager;
pub use model::{Catalog, CatalogEntry, PanelItem};
