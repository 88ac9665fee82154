use thiserror::Error;

/// Failures while reading the background color out of a theme file.
///
/// A parse error never aborts catalog construction; the catalog builder
/// turns it into an entry without a brightness classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The resource is not a property list, has an unexpected structure,
    /// or carries a background value that is not a usable hex color.
    #[error("malformed theme: {0}")]
    Malformed(String),

    /// `settings[0].settings.background` is missing.
    #[error("theme has no background color")]
    NoBackground,
}

/// Error type shared by every component of the scheme engine.
///
/// # Error Categories
///
/// ## Per-resource errors (swallowed by the catalog builder)
/// - [`Parse`] - theme content could not be interpreted
/// - [`ResourceUnreadable`] - the lister failed to read a resource
/// - [`ResourceNotFound`] - no backend knows the requested id
///
/// ## Selection errors
/// - [`EmptyCatalog`] - nothing to select from; the only hard selector error
/// - [`SelectionNotFound`] - the current id is stale; recovered by falling
///   back to the first entry
/// - [`SelectionOutOfRange`] / [`SessionClosed`] - misuse of a preview session
///
/// ## Configuration errors
/// - [`InvalidPattern`] - a noise filter or resource glob does not compile
/// - [`InvalidDirection`] - unknown cycle direction
/// - [`Settings`] - the settings collaborator failed to persist
///
/// [`Parse`]: SchemeError::Parse
/// [`ResourceUnreadable`]: SchemeError::ResourceUnreadable
/// [`ResourceNotFound`]: SchemeError::ResourceNotFound
/// [`EmptyCatalog`]: SchemeError::EmptyCatalog
/// [`SelectionNotFound`]: SchemeError::SelectionNotFound
/// [`SelectionOutOfRange`]: SchemeError::SelectionOutOfRange
/// [`SessionClosed`]: SchemeError::SessionClosed
/// [`InvalidPattern`]: SchemeError::InvalidPattern
/// [`InvalidDirection`]: SchemeError::InvalidDirection
/// [`Settings`]: SchemeError::Settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("resource '{id}' is unreadable: {reason}")]
    ResourceUnreadable { id: String, reason: String },

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("no color schemes available")]
    EmptyCatalog,

    #[error("scheme '{0}' is not part of the catalog")]
    SelectionNotFound(String),

    #[error("selection index {index} out of range (catalog has {len} entries)")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("selection session already finished")]
    SessionClosed,

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid cycle direction '{0}' (expected next, prev or rand)")]
    InvalidDirection(String),

    #[error("settings error: {0}")]
    Settings(String),
}

impl SchemeError {
    pub fn unreadable(id: &str, reason: impl ToString) -> Self {
        SchemeError::ResourceUnreadable {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Per-resource failures that the catalog builder tolerates.
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            SchemeError::Parse(_)
                | SchemeError::ResourceUnreadable { .. }
                | SchemeError::ResourceNotFound(_)
        )
    }
}

/// Result alias for engine operations
pub type SchemeResult<T> = Result<T, SchemeError>;
