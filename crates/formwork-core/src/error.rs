//! # Error Types — Structured Error Hierarchy
//!
//! Defines the errors raised while defining a model. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Both public errors are raised at definition time. Building an instance
//!   from a validated model never fails.
//! - Schema errors name the offending field path and describe what was given.
//! - Validation is fail-fast: the first invalid field aborts the definition.

use thiserror::Error;

/// Top-level error returned by `define_model`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The definition argument itself is missing or of an unsupported shape.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A field of the definition has an unsupported descriptor.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ModelError {
    /// Returns the schema error, if this is one.
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(e) => Some(e),
            Self::Argument(_) => None,
        }
    }

    /// Returns true if the definition argument was rejected as a whole.
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }

    /// Returns true if an individual field was rejected.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

/// The top-level definition argument is not a plain definition mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("you must provide a model definition object as the first argument, got {given}")]
pub struct ArgumentError {
    /// Description of the rejected argument.
    pub given: String,
}

impl ArgumentError {
    pub fn new(given: impl Into<String>) -> Self {
        Self {
            given: given.into(),
        }
    }
}

/// A field descriptor did not match any supported variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid field {field}: {given}. Fields must be type constructors, arrays, or nested definitions"
)]
pub struct SchemaError {
    /// Dotted path of the offending field (e.g. `payment.terms`).
    pub field: String,
    /// Description of the descriptor that was given.
    pub given: String,
}

impl SchemaError {
    pub fn new(field: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            given: given.into(),
        }
    }
}

/// Failure to read a date out of a literal value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateError {
    /// Text that is neither RFC 3339 nor `YYYY-MM-DD`.
    #[error("invalid date literal {0:?}")]
    Unparsable(String),

    /// Epoch milliseconds outside the representable range (or not finite).
    #[error("epoch milliseconds out of range: {0}")]
    OutOfRange(f64),

    /// The value kind has no date reading.
    #[error("a {0} value cannot be read as a date")]
    Unsupported(&'static str),
}
