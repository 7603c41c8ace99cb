//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary of the
//! risk dashboard domain.

mod errors;
mod score;
mod timestamp;

pub use errors::ValidationError;
pub use score::Score;
pub use timestamp::Timestamp;

/// Placeholder for any text field the model or the user left empty.
pub const NOT_SPECIFIED: &str = "Not specified";
