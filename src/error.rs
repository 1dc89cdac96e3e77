//! Error types for the harvest analytics engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only the dataset load and configuration load can fail; once a dataset is
//! in memory, every downstream computation is a total function over its
//! inputs. Malformed dates and quantities inside an otherwise valid record
//! are coerced or skipped rather than surfaced, and invalid URL state
//! parameters are silently replaced by their defaults.

use thiserror::Error;

/// The main error type for the harvest analytics engine.
///
/// # Example
///
/// ```
/// use harvest_engine::error::EngineError;
///
/// let error = EngineError::LoadStatus { status: 404 };
/// assert_eq!(error.to_string(), "Dataset fetch failed with status 404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The dataset fetch completed with a non-success status.
    #[error("Dataset fetch failed with status {status}")]
    LoadStatus {
        /// The HTTP-style status code reported by the source.
        status: u16,
    },

    /// The dataset payload could not be parsed, or had the wrong shape.
    #[error("Invalid dataset payload: {message}")]
    LoadPayload {
        /// A description of what was wrong with the payload.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
