//! Error types for Tagseal core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Item-level failures (decryption, encryption, malformed tokens) are
//! collected into reports by batch operations rather than propagated; the
//! CLI layer maps the rest to user-friendly messages.

use serde::Serialize;
use thiserror::Error;

use crate::session::SessionPhase;

/// Result type alias for Tagseal operations.
pub type Result<T> = std::result::Result<T, TagsealError>;

/// Core error type for Tagseal operations.
#[derive(Debug, Error)]
pub enum TagsealError {
    /// Authentication tag did not verify (wrong password or corrupted token)
    #[error("Decryption failed: wrong password or corrupted data")]
    Decryption,

    /// Underlying cipher or random source failed while sealing
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Wire value could not be parsed into a token
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// A top-level operation was requested while another one owns the session
    #[error("Session is busy ({phase})")]
    Busy { phase: SessionPhase },

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence error (host-side item files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl TagsealError {
    /// Classify an item-level error for inclusion in a batch report.
    ///
    /// Returns `None` for errors that are not tied to a single item.
    pub fn kind(&self) -> Option<ItemErrorKind> {
        match self {
            TagsealError::Decryption => Some(ItemErrorKind::Decryption),
            TagsealError::Encryption(_) => Some(ItemErrorKind::Encryption),
            TagsealError::MalformedToken(_) => Some(ItemErrorKind::MalformedToken),
            _ => None,
        }
    }
}

/// The per-item failure kinds recorded by batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemErrorKind {
    Decryption,
    Encryption,
    MalformedToken,
}

impl std::fmt::Display for ItemErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ItemErrorKind::Decryption => "decryption failed",
            ItemErrorKind::Encryption => "encryption failed",
            ItemErrorKind::MalformedToken => "malformed token",
        };
        f.write_str(label)
    }
}

impl From<std::io::Error> for TagsealError {
    fn from(err: std::io::Error) -> Self {
        TagsealError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TagsealError {
    fn from(err: serde_json::Error) -> Self {
        TagsealError::Storage(err.to_string())
    }
}
