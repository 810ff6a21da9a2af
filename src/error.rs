//! Error types for Plot Pilot.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Plot Pilot operations.
pub type Result<T> = std::result::Result<T, PilotError>;

/// Errors that can occur in Plot Pilot.
#[derive(Debug, Error)]
pub enum PilotError {
    /// Failed to read a data file into memory.
    #[error("Failed to read file: {path}")]
    FileRead {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be sent or timed out in transit.
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The plotting service answered outside the success range.
    #[error("Server returned HTTP {status}: {body}")]
    Status {
        /// The non-success status code.
        status: reqwest::StatusCode,
        /// An excerpt of the response body, for the log.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PilotError {
    /// Create a FileRead error.
    pub fn file_read(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileRead { path, source }
    }

    /// Create a Status error, keeping only an excerpt of the body.
    pub fn status(status: reqwest::StatusCode, body: String) -> Self {
        let body = if body.len() > 200 {
            let mut end = 200;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}…", &body[..end])
        } else {
            body
        };
        Self::Status { status, body }
    }
}
