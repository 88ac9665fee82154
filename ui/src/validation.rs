/// Core validation trait for values supplied by the user.
///
/// Command-line arguments and configuration values pass through a validator
/// before they reach the engine, so that a bad value is reported with a
/// readable message instead of surfacing as an engine error.
///
/// # Type Parameters
///
/// * `T` - The type of data being validated (can be unsized like `str`)
///
/// # Examples
///
/// ```
/// use schemr::validation::Validator;
///
/// struct NonEmpty;
/// impl Validator<str> for NonEmpty {
///     type Error = String;
///
///     fn validate(&self, input: &str) -> Result<(), Self::Error> {
///         if input.is_empty() {
///             Err("Input cannot be empty".to_string())
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}
