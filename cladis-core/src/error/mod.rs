//! Core error types for Cladis

pub mod taxonomy;

use thiserror::Error;
pub use taxonomy::{LookupError, TaxonomyBuildError};

/// Main error type for Cladis operations
#[derive(Error, Debug)]
pub enum CladisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Taxonomy index is not ready")]
    NotReady,

    #[error("Taxonomy build failed: {0}")]
    Build(#[from] TaxonomyBuildError),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Cladis operations
pub type CladisResult<T> = Result<T, CladisError>;

// Conversion implementations for common error types
impl From<serde_json::Error> for CladisError {
    fn from(err: serde_json::Error) -> Self {
        CladisError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for CladisError {
    fn from(err: csv::Error) -> Self {
        CladisError::Parse(err.to_string())
    }
}

impl From<anyhow::Error> for CladisError {
    fn from(err: anyhow::Error) -> Self {
        CladisError::Other(err.to_string())
    }
}
