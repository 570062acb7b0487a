//! Error types for systags operations.
//!
//! This module defines [`SystagsError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SystagsError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SystagsError::Other`) for unexpected errors
//! - Errors propagate to the command boundary unchanged; no local recovery

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for systags operations.
#[derive(Debug, Error)]
pub enum SystagsError {
    /// Missing or invalid flag value, caught before any I/O.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Malformed tag file. Aborts the whole load; no partial merge.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Fetching tags from the cloud provider failed.
    #[error("Remote fetch failed: {message}")]
    RemoteFetch { message: String },

    /// Invalid pick/omit pattern.
    #[error("Invalid filter pattern: {message}")]
    Filter { message: String },

    /// A formatter failed to serialize the tag mapping.
    #[error("Failed to format tags as {format}: {message}")]
    Format { format: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for systags operations.
pub type Result<T> = std::result::Result<T, SystagsError>;
