pub mod errors;

pub use errors::{ParseError, SchemeError, SchemeResult};
