//! Error types for the pantry library.
//!
//! All errors are represented by the [`PantryError`] enum. Failures coming out
//! of the learning code are wrapped from [`MLError`](crate::ml::MLError).
//!
//! # Examples
//!
//! ```
//! use pantry::error::{PantryError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PantryError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::ml::MLError;

/// The main error type for pantry operations.
#[derive(Error, Debug)]
pub enum PantryError {
    /// I/O errors (missing dataset, unreadable artifact, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Artifact encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Dataset shape errors (missing columns and the like)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Fitting and prediction errors
    #[error(transparent)]
    Ml(#[from] MLError),

    /// A required file is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PantryError.
pub type Result<T> = std::result::Result<T, PantryError>;

impl PantryError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PantryError::Analysis(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        PantryError::Dataset(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        PantryError::NotFound(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PantryError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PantryError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PantryError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Whether this error reports a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            PantryError::NotFound(_) => true,
            PantryError::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PantryError::dataset("missing column");
        assert_eq!(error.to_string(), "Dataset error: missing column");

        let error = PantryError::analysis("bad pattern");
        assert_eq!(error.to_string(), "Analysis error: bad pattern");

        let error = PantryError::invalid_argument("empty");
        assert_eq!(error.to_string(), "Error: Invalid argument: empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let pantry_error = PantryError::from(io_error);

        match &pantry_error {
            PantryError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
        assert!(pantry_error.is_not_found());
    }

    #[test]
    fn test_ml_error_is_transparent() {
        let error = PantryError::from(MLError::InsufficientClasses { actual: 1 });
        assert_eq!(
            error.to_string(),
            "Training data needs at least 2 classes, got 1"
        );
    }
}
