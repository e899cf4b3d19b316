//! Structural equality between an executed query's output and a level's
//! target result.
//!
//! The rules, in order:
//!
//! 1. A missing (`None`) actual result never matches.
//! 2. Every expected column must exist by exact name in the actual result;
//!    extra actual columns are ignored, and actual column order is
//!    irrelevant.
//! 3. Row counts must be equal exactly.
//! 4. Rows are compared positionally (row `r` against row `r`), so the
//!    player's query must return rows in the exact order the target
//!    implies.
//! 5. Cells compare on their string form, so `1` and `"1"` are equal and
//!    NULL stringifies identically on both sides.

use crate::types::{QueryResult, TargetResult, Value};

/// Returns `true` if `actual` satisfies the level target `expected`.
///
/// Pure and total: never panics for any input, including ragged rows
/// (a row shorter than its column list simply fails to match).
///
/// # Examples
///
/// ```
/// use queryquest_core::{QueryResult, TargetResult, Value, results_match};
///
/// let target = TargetResult {
///     columns: vec!["a".into(), "b".into()],
///     rows: vec![vec![Value::Integer(1), Value::Integer(2)]],
/// };
///
/// // Column order in the actual result does not matter.
/// let reordered = QueryResult {
///     columns: vec!["b".into(), "a".into()],
///     rows: vec![vec![Value::Integer(2), Value::Integer(1)]],
///     message: None,
/// };
/// assert!(results_match(Some(&reordered), &target));
///
/// // Row order does.
/// let swapped = QueryResult {
///     columns: vec!["a".into(), "b".into()],
///     rows: vec![vec![Value::Integer(2), Value::Integer(1)]],
///     message: None,
/// };
/// assert!(!results_match(Some(&swapped), &target));
/// ```
pub fn results_match(actual: Option<&QueryResult>, expected: &TargetResult) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    // Resolve each expected column to its position in the actual result.
    let mut col_indices = Vec::with_capacity(expected.columns.len());
    for name in &expected.columns {
        match actual.columns.iter().position(|c| c == name) {
            Some(idx) => col_indices.push(idx),
            None => return false,
        }
    }

    if actual.rows.len() != expected.rows.len() {
        return false;
    }

    for (expected_row, actual_row) in expected.rows.iter().zip(&actual.rows) {
        for (cell, &idx) in expected_row.iter().zip(&col_indices) {
            match actual_row.get(idx) {
                Some(actual_cell) if cells_equal(actual_cell, cell) => {}
                _ => return false,
            }
        }
    }

    true
}

/// String-coerced cell equality. Treats `1` and `"1"` as equal, which
/// absorbs numeric/text affinity differences between SQL engines.
fn cells_equal(a: &Value, b: &Value) -> bool {
    a == b || a.to_string() == b.to_string()
}
