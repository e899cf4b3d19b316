//! Level pack validation.
//!
//! Catches structural problems in a level pack before a session starts:
//! empty packs, out-of-sequence level numbers, duplicate or missing target
//! columns, and target rows whose arity disagrees with the column list.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::Level;

/// Structural problems found in a level pack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The pack contains no levels at all.
    #[error("level pack contains no levels")]
    EmptyPack,
    /// Level ids must be 1-based and sequential in pack order.
    #[error("level at position {position} has id {id}, expected {expected}")]
    NonSequentialId {
        /// Zero-based position in the pack.
        position: usize,
        /// The id the level declares.
        id: u32,
        /// The id its position implies.
        expected: u32,
    },
    /// A level's target declares no columns.
    #[error("level {level_id} target has no columns")]
    EmptyTargetColumns {
        /// Offending level id.
        level_id: u32,
    },
    /// Two target columns in the same level share a name.
    #[error("level {level_id} target has duplicate column: {column}")]
    DuplicateTargetColumn {
        /// Offending level id.
        level_id: u32,
        /// The repeated column name.
        column: String,
    },
    /// A target row's cell count disagrees with the column count.
    #[error("level {level_id} target row {row} has {found} cells, expected {expected}")]
    RowArityMismatch {
        /// Offending level id.
        level_id: u32,
        /// Zero-based row index within the target.
        row: usize,
        /// Number of target columns.
        expected: usize,
        /// Number of cells actually present.
        found: usize,
    },
}

/// Validates a level pack, returning every problem found.
///
/// An empty vector means the pack is well-formed.
///
/// # Examples
///
/// ```
/// use queryquest_core::{Level, TargetResult, Value, validate_levels};
///
/// let levels = vec![Level {
///     id: 1,
///     title: "The Breach".into(),
///     description: "Find the denied access attempt.".into(),
///     hint: "Filter on access_granted.".into(),
///     expected_query: None,
///     target: TargetResult {
///         columns: vec!["id".into()],
///         rows: vec![vec![Value::Integer(6)]],
///     },
/// }];
/// assert!(validate_levels(&levels).is_empty());
/// ```
pub fn validate_levels(levels: &[Level]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if levels.is_empty() {
        errors.push(ValidationError::EmptyPack);
        return errors;
    }

    for (position, level) in levels.iter().enumerate() {
        let expected = position as u32 + 1;
        if level.id != expected {
            errors.push(ValidationError::NonSequentialId {
                position,
                id: level.id,
                expected,
            });
        }

        if level.target.columns.is_empty() {
            errors.push(ValidationError::EmptyTargetColumns { level_id: level.id });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for column in &level.target.columns {
            if !seen.insert(column.as_str()) {
                errors.push(ValidationError::DuplicateTargetColumn {
                    level_id: level.id,
                    column: column.clone(),
                });
            }
        }

        let expected_arity = level.target.columns.len();
        for (row, cells) in level.target.rows.iter().enumerate() {
            if cells.len() != expected_arity {
                errors.push(ValidationError::RowArityMismatch {
                    level_id: level.id,
                    row,
                    expected: expected_arity,
                    found: cells.len(),
                });
            }
        }
    }

    errors
}
