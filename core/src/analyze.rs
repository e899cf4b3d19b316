//! Deterministic hints for wrong-but-executable queries.
//!
//! The analyzer never inspects result data. It compares the *clause
//! structure* of the player's query against the level's reference solution:
//! a fixed, ordered set of detectors checks which structural clauses the
//! reference uses that the player's query lacks, and the first missing
//! clause (in detector order) selects the hint. Identical clause sets fall
//! through to a fixed "structure sound, data misaligned" hint.
//!
//! Every path is deterministic: the same two query texts always produce
//! the same hint.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A structural SQL clause the analyzer knows how to detect.
///
/// Variant order is the fixed detection order, which doubles as the
/// tie-break for which hint is shown when several clauses are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Where,
    Join,
    GroupBy,
    OrderBy,
    Having,
    Limit,
    Distinct,
}

impl Clause {
    /// All clauses in detection order.
    pub const ALL: [Clause; 7] = [
        Clause::Where,
        Clause::Join,
        Clause::GroupBy,
        Clause::OrderBy,
        Clause::Having,
        Clause::Limit,
        Clause::Distinct,
    ];

    /// The SQL keyword(s) this clause corresponds to.
    pub fn keyword(self) -> &'static str {
        match self {
            Clause::Where => "WHERE",
            Clause::Join => "JOIN",
            Clause::GroupBy => "GROUP BY",
            Clause::OrderBy => "ORDER BY",
            Clause::Having => "HAVING",
            Clause::Limit => "LIMIT",
            Clause::Distinct => "DISTINCT",
        }
    }

    /// The fixed hint shown when this clause is the first one missing.
    pub fn hint(self) -> &'static str {
        match self {
            Clause::Where => {
                "ANALYST :: You forgot to filter the noise with a WHERE clause. \
                 The database isn't a mind reader. Specify your conditions."
            }
            Clause::Join => {
                "CRITICAL ERROR :: Data is scattered across tables like debris in \
                 zero gravity. Use a JOIN to bring them together, Analyst."
            }
            Clause::GroupBy => {
                "AGGREGATION FAILURE :: You're trying to summarize data without \
                 grouping it. Add a GROUP BY clause before the system collapses."
            }
            Clause::OrderBy => {
                "CHAOS DETECTED :: Your results are unordered. Use ORDER BY to \
                 impose structure on the data stream, Analyst."
            }
            Clause::Having => {
                "FILTER MALFUNCTION :: You need HAVING to filter aggregated \
                 results. WHERE won't cut it here. Think post-aggregation."
            }
            Clause::Limit => {
                "DATA OVERFLOW :: You're pulling too much data. Use LIMIT to \
                 constrain the output before the buffer overflows."
            }
            Clause::Distinct => {
                "DUPLICATE ANOMALY :: Your results contain redundant entries. \
                 Apply DISTINCT to eliminate the noise, Analyst."
            }
        }
    }

    fn detector(self) -> &'static Regex {
        // Word-boundary patterns tolerant of internal whitespace; the JOIN
        // detector also matches the qualified join forms.
        static WHERE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bWHERE\b"));
        static JOIN: LazyLock<Regex> = LazyLock::new(|| {
            pattern(r"\b(?:INNER\s+JOIN|LEFT\s+JOIN|RIGHT\s+JOIN|FULL\s+JOIN|JOIN)\b")
        });
        static GROUP_BY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bGROUP\s+BY\b"));
        static ORDER_BY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bORDER\s+BY\b"));
        static HAVING: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bHAVING\b"));
        static LIMIT: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bLIMIT\b"));
        static DISTINCT: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bDISTINCT\b"));

        match self {
            Clause::Where => &WHERE,
            Clause::Join => &JOIN,
            Clause::GroupBy => &GROUP_BY,
            Clause::OrderBy => &ORDER_BY,
            Clause::Having => &HAVING,
            Clause::Limit => &LIMIT,
            Clause::Distinct => &DISTINCT,
        }
    }

    /// Case-insensitive presence test against arbitrary query text.
    pub fn present_in(self, query: &str) -> bool {
        self.detector().is_match(query)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

fn pattern(body: &str) -> Regex {
    Regex::new(&format!("(?i){body}")).expect("clause detector pattern is valid")
}

/// Fixed hint for a mismatch where the clause structure already agrees
/// with the reference solution.
pub const MISMATCH_FALLBACK_HINT: &str =
    "ANALYST :: Your query structure is sound, but the data doesn't align. Check your \
     conditions, column names, and table references. The truth is in the details.";

/// Outcome of diffing the player's query against the reference solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnalysis {
    /// The hint to surface: the fixed text for the first missing clause,
    /// or [`MISMATCH_FALLBACK_HINT`] when nothing is missing.
    pub hint: &'static str,
    /// All clauses present in the reference but absent from the player's
    /// query, in detection order.
    pub missing_clauses: Vec<Clause>,
}

/// Diffs the player's query against the level's reference solution.
///
/// # Examples
///
/// ```
/// use queryquest_core::{Clause, analyze_mismatch};
///
/// let analysis = analyze_mismatch(
///     "SELECT * FROM t",
///     "SELECT * FROM t WHERE x = 1 GROUP BY y",
/// );
/// assert_eq!(analysis.missing_clauses, vec![Clause::Where, Clause::GroupBy]);
/// assert_eq!(analysis.hint, Clause::Where.hint());
/// ```
pub fn analyze_mismatch(user_query: &str, expected_query: &str) -> QueryAnalysis {
    let missing_clauses: Vec<Clause> = Clause::ALL
        .into_iter()
        .filter(|clause| clause.present_in(expected_query) && !clause.present_in(user_query))
        .collect();

    let hint = match missing_clauses.first() {
        Some(clause) => clause.hint(),
        None => MISMATCH_FALLBACK_HINT,
    };

    QueryAnalysis {
        hint,
        missing_clauses,
    }
}

/// Contextual hint for a query that executed but returned zero rows, used
/// for levels that carry no reference solution.
///
/// Keyed by whether the query contains `WHERE`, contains `JOIN`, or
/// neither, in that priority order.
pub fn analyze_empty_result(user_query: &str) -> &'static str {
    if Clause::Where.present_in(user_query) {
        "ZERO RECORDS FOUND :: Your WHERE conditions may be too restrictive. Verify your \
         filter values match the actual data in the tables."
    } else if Clause::Join.present_in(user_query) {
        "JOIN MISMATCH :: No matching records found between tables. Check your JOIN \
         conditions and ensure the foreign keys align correctly."
    } else {
        "NO DATA RETRIEVED :: The query executed successfully but returned nothing. \
         Double-check your table names, column names, and filter conditions."
    }
}
