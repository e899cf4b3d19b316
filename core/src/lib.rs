//! Core types and verification logic for the QueryQuest SQL game.
//!
//! This crate holds everything that does not need a live database:
//!
//! - [`QueryResult`] / [`Value`]: the shape of an executed query's output.
//! - [`Level`] / [`TargetResult`]: one static puzzle unit and the exact
//!   result set a correct query must reproduce.
//! - [`results_match`]: column-order-insensitive, row-order-sensitive,
//!   string-coerced equality against a level target.
//! - [`analyze_mismatch`] / [`analyze_empty_result`]: deterministic hints
//!   derived from SQL clauses present in the reference query but missing
//!   from the player's.
//! - [`validate_levels`]: structural validation for level packs.
//!
//! # Example
//!
//! ```
//! use queryquest_core::*;
//!
//! let target = TargetResult {
//!     columns: vec!["name".into()],
//!     rows: vec![vec![Value::Text("Bob".into())]],
//! };
//!
//! // Extra columns in the actual result are ignored.
//! let actual = QueryResult {
//!     columns: vec!["id".into(), "name".into()],
//!     rows: vec![vec![Value::Integer(2), Value::Text("Bob".into())]],
//!     message: None,
//! };
//! assert!(results_match(Some(&actual), &target));
//! ```

mod analyze;
mod compare;
mod types;
mod validate;

pub use analyze::{
    Clause, MISMATCH_FALLBACK_HINT, QueryAnalysis, analyze_empty_result, analyze_mismatch,
};
pub use compare::results_match;
pub use types::{Level, QueryResult, TargetResult, Value};
pub use validate::{ValidationError, validate_levels};
