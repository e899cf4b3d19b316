//! Feedback emitted by the session reducer for a front end to render.

use queryquest_core::QueryResult;

/// Placeholder text shown in the editor while transitioning between
/// levels.
pub const CACHE_PURGE_PLACEHOLDER: &str =
    "-- Level Complete! System purging cache...\n-- Awaiting next command.";

/// One renderable consequence of applying an [`Event`](crate::Event).
///
/// A single event can yield several of these (e.g. a correct submission
/// produces the result set, the completion notice, and the advancement),
/// in the order they should be presented.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// A query executed; here is its output for the results pane.
    Results(QueryResult),
    /// A query was rejected; the message is the failure reason, surfaced
    /// verbatim.
    QueryFailed(String),
    /// A pedagogical hint (wrong-answer analysis or the level's static
    /// hint text).
    Hint(String),
    /// The current level's target was satisfied.
    LevelComplete {
        /// 1-based id of the completed level.
        level_id: u32,
    },
    /// Transitional placeholder before the next level's content appears;
    /// render [`CACHE_PURGE_PLACEHOLDER`].
    CachePurge,
    /// Progression moved to a newly unlocked level.
    Advanced {
        /// 1-based id of the level now current.
        level_id: u32,
    },
    /// The final level was completed; the mission is over.
    MissionComplete,
    /// The timer expired; the session is now failed.
    SystemFailure,
    /// The database was reseeded (manual reset, retry, or restart).
    DatabaseReset,
}
