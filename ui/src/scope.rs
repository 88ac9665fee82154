//! Settings scope selection from the command line.

use crate::error::AppError;
use crate::validation::Validator;
use engine::settings::Scope;

/// Longest accepted syntax name.
pub const MAX_SYNTAX_NAME_LENGTH: usize = 64;

/// Validation errors for `--syntax` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxValidationError {
    Empty,
    TooLong { name: String, max: usize },
    PathSeparator { name: String },
    ReservedName { name: String },
}

impl SyntaxValidationError {
    pub fn user_message(&self) -> String {
        match self {
            SyntaxValidationError::Empty => "Syntax name cannot be empty.".to_string(),
            SyntaxValidationError::TooLong { name, max } => {
                format!(
                    "Syntax name too long: '{name}'\n\n\
                    Names are limited to {max} characters."
                )
            }
            SyntaxValidationError::PathSeparator { name } => {
                format!(
                    "Invalid syntax name: '{name}'\n\n\
                    Pass the syntax name (for example 'Python'), not a path."
                )
            }
            SyntaxValidationError::ReservedName { name } => {
                format!(
                    "Invalid syntax name: '{name}'\n\n\
                    This name is used by schemr's own settings files."
                )
            }
        }
    }
}

impl From<SyntaxValidationError> for AppError {
    fn from(error: SyntaxValidationError) -> Self {
        AppError::Config(error.user_message())
    }
}

/// Validator for syntax names used as per-syntax settings file stems
pub struct SyntaxNameValidator;

impl Validator<str> for SyntaxNameValidator {
    type Error = SyntaxValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        if input.trim().is_empty() {
            return Err(SyntaxValidationError::Empty);
        }

        if input.chars().count() > MAX_SYNTAX_NAME_LENGTH {
            return Err(SyntaxValidationError::TooLong {
                name: input.to_string(),
                max: MAX_SYNTAX_NAME_LENGTH,
            });
        }

        if input.contains(['/', '\\']) || input == "." || input == ".." {
            return Err(SyntaxValidationError::PathSeparator {
                name: input.to_string(),
            });
        }

        if input.eq_ignore_ascii_case("Preferences") || input.eq_ignore_ascii_case("SchemrFavorites") {
            return Err(SyntaxValidationError::ReservedName {
                name: input.to_string(),
            });
        }

        Ok(())
    }
}

/// Global scope, or the per-syntax scope named by `--syntax`.
pub fn resolve_scope(syntax: Option<&str>) -> Result<Scope, SyntaxValidationError> {
    match syntax {
        None => Ok(Scope::Global),
        Some(name) => {
            SyntaxNameValidator.validate(name)?;
            Ok(Scope::Syntax(name.trim().to_string()))
        }
    }
}
