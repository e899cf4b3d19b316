//! Error types for the engine adapter.
//!
//! Engine-level failures are local and recoverable: the player edits the
//! query and resubmits. Nothing here is retried automatically, since the
//! causes are deterministic (bad query text, or an adapter that has not
//! finished initializing).

use thiserror::Error;

/// Errors that can occur when executing a query through the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Blank submission, rejected before reaching the engine.
    #[error("no query provided: enter a SQL statement to run")]
    EmptyQuery,

    /// No live database handle exists (initialization or reseed failed).
    #[error("database is not ready yet")]
    NotReady,

    /// The engine rejected the query; carries the engine's diagnostic text.
    #[error("SQL error: {0}")]
    Sql(String),
}

impl From<rusqlite::Error> for EngineError {
    fn from(e: rusqlite::Error) -> Self {
        EngineError::Sql(e.to_string())
    }
}

/// Convenience alias for results with [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
