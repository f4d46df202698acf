//! Error types for the schoolmap library.

use thiserror::Error;

/// Errors raised while validating user-supplied school data or coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was absent (or `null`).
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// A text field was present but empty after trimming.
    #[error("Field must not be empty: {field}")]
    EmptyField { field: &'static str },

    /// A numeric field could not be parsed as a number.
    #[error("Field is not a number: {field}")]
    NotANumber { field: &'static str },

    /// A numeric field was NaN or infinite.
    #[error("Field must be a finite number: {field}")]
    NonFinite { field: &'static str },

    /// Latitude outside [-90, 90].
    #[error("Latitude out of range: {lat} (valid: -90 to 90)")]
    LatitudeOutOfRange { lat: f64 },

    /// Longitude outside [-180, 180].
    #[error("Longitude out of range: {lon} (valid: -180 to 180)")]
    LongitudeOutOfRange { lon: f64 },
}

/// Errors reported by a [`SchoolStore`](crate::SchoolStore) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing database failed (connectivity, constraint, query).
    #[error("Storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The store did not answer within the configured timeout.
    #[error("Storage operation timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
