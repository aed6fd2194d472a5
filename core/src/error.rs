//! Error types for request building and execution.
//!
//! # Design
//! Each failure class that used to disappear silently in ad-hoc HTTP glue
//! gets its own variant, so callers can match on what actually went wrong:
//! a request that never became valid, a body that never serialized, a file
//! that never opened, or a network round-trip that failed.

use std::fmt;

/// Errors produced while building, materializing, or sending a request.
#[derive(Debug)]
pub enum RequestError {
    /// The method or URL could not be turned into a valid outbound request.
    InvalidRequest(String),

    /// The network round-trip failed before a response was received.
    Transport(String),

    /// The JSON or XML body payload could not be serialized.
    Serialization(String),

    /// A multipart file part could not be opened or read.
    FileAttachment { path: String, message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidRequest(msg) => {
                write!(f, "invalid request: {msg}")
            }
            RequestError::Transport(msg) => {
                write!(f, "transport failed: {msg}")
            }
            RequestError::Serialization(msg) => {
                write!(f, "body serialization failed: {msg}")
            }
            RequestError::FileAttachment { path, message } => {
                write!(f, "file attachment {path} failed: {message}")
            }
        }
    }
}

impl std::error::Error for RequestError {}
