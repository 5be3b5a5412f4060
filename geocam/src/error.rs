//! Error types for the GeoCam core
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to the presentation layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value exists but does not have the expected shape
    #[error("Malformed value under '{key}': {reason}")]
    Decode { key: String, reason: String },

    #[error("Invalid day key: {0} (expected YYYY-MM-DD)")]
    InvalidDay(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("{0}")]
    Generic(String),
}

impl AppError {
    pub fn decode(key: &str, reason: impl std::fmt::Display) -> Self {
        AppError::Decode {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
