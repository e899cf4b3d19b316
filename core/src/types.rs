//! Data model for levels and query results.
//!
//! These types are designed for serialization with [`serde`]; level packs
//! round-trip through JSON, and target cells use the same [`Value`] scalar
//! as live query results so the comparator never has to bridge two
//! representations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar cell in a query result or level target.
///
/// Comparison between actual and expected cells is done on the string form
/// (see [`results_match`](crate::results_match)), so `Integer(1)` and
/// `Text("1")` compare equal by design. `Null` renders as the literal
/// `null`, which keeps absent values representable in level targets.
///
/// # Examples
///
/// ```
/// use queryquest_core::Value;
///
/// assert_eq!(Value::Integer(1).to_string(), "1");
/// assert_eq!(Value::Text("1".into()).to_string(), "1");
/// assert_eq!(Value::Null.to_string(), "null");
/// assert_eq!(Value::Real(0.45).to_string(), "0.45");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL. Serializes as JSON `null`.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Real(f64),
    /// Text value.
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Real(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Output of one query execution.
///
/// Produced fresh per execution by the engine adapter and owned by the
/// caller for the duration of one render cycle; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names, in the order the engine returned them.
    pub columns: Vec<String>,
    /// Row values, positionally aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
    /// Human-readable execution summary (e.g. `"3 row(s) returned"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QueryResult {
    /// An empty result with the given summary message.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            message: Some(message.into()),
        }
    }
}

/// The exact columns and rows a correct query for a level must reproduce.
///
/// Column order here drives the row-value comparison; row order is
/// significant (the player's query must return rows in this order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetResult {
    /// Expected column names (unique).
    pub columns: Vec<String>,
    /// Expected rows, positionally aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

/// One static puzzle unit.
///
/// Levels are immutable once loaded; their order in the pack defines the
/// only valid progression path. Invariant (enforced by
/// [`validate_levels`](crate::validate_levels)): every target row has
/// exactly as many cells as the target has columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based sequential level number.
    pub id: u32,
    /// Short display title.
    pub title: String,
    /// Mission briefing shown to the player.
    pub description: String,
    /// Static hint text, surfaced verbatim by the `hint` shell command.
    pub hint: String,
    /// Reference solution used by the diff analyzer to classify wrong
    /// answers. Levels without one fall back to the empty-result heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_query: Option<String>,
    /// The result set a correct query must reproduce.
    pub target: TargetResult,
}
