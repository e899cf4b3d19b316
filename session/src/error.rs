//! Error types for session construction and level pack loading.

use thiserror::Error;

use queryquest_engine::EngineError;

/// Errors that can occur while loading a level pack.
#[derive(Debug, Error)]
pub enum PackError {
    /// File I/O failure reading a pack from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The pack parsed but failed structural validation.
    #[error("invalid level pack: {0}")]
    Invalid(String),
}

/// Errors that can occur when constructing a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The level pack failed structural validation.
    #[error("invalid level pack: {0}")]
    InvalidLevels(String),

    /// The engine adapter could not be initialized.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The built-in campaign or an external pack could not be loaded.
    #[error(transparent)]
    Pack(#[from] PackError),
}

/// Convenience alias for results with [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
