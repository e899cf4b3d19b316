//! The engine adapter: a single seeded in-memory SQLite handle.
//!
//! [`SqlEngine`] owns the one live database handle for a game session. It
//! is opened against the embedded mystery seed script, and [`reset`]
//! replaces the handle wholesale (fresh database, seed replayed verbatim)
//! rather than mutating in place, so a reset can never leave the database
//! half-restored.
//!
//! [`reset`]: SqlEngine::reset

use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection};
use tracing::debug;

use queryquest_core::{QueryResult, Value};

use crate::error::{EngineError, Result};

/// The fixed schema + data script replayed on every reset.
///
/// The table and column names in here are a contract the level targets
/// depend on.
pub const SEED_SQL: &str = include_str!("seed.sql");

/// Metadata query backing the `ls` / `ls tables` shell alias.
pub const TABLE_LISTING_SQL: &str = "SELECT name AS table_name, type FROM sqlite_master \
     WHERE type IN ('table', 'view') ORDER BY name;";

/// Wraps the embedded SQL engine behind a query-execution capability and a
/// reset capability.
///
/// Exactly one live handle exists at a time. If reseeding fails during a
/// reset the adapter is left without a handle and reports
/// [`EngineError::NotReady`] until a later reset succeeds.
///
/// # Examples
///
/// ```
/// use queryquest_engine::SqlEngine;
///
/// let engine = SqlEngine::new().unwrap();
/// let result = engine
///     .execute_query("SELECT name FROM employees WHERE id = 7;")
///     .unwrap();
/// assert_eq!(result.rows[0][0].to_string(), "Greg Sales");
/// ```
pub struct SqlEngine {
    conn: Option<Connection>,
}

impl SqlEngine {
    /// Opens a fresh in-memory database and runs the seed script.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Sql`] if the database cannot be opened or
    /// the seed script fails.
    pub fn new() -> Result<Self> {
        let conn = open_seeded()?;
        Ok(Self { conn: Some(conn) })
    }

    /// Whether a live handle exists and queries can be executed.
    pub fn is_ready(&self) -> bool {
        self.conn.is_some()
    }

    /// Executes free-form query text against the live handle.
    ///
    /// Multi-statement input is executed statement by statement. The first
    /// statement that produces rows supplies the returned result set;
    /// later result sets are silently discarded (a deliberate
    /// simplification, matching the single output pane they feed). If no
    /// statement produces rows the result is empty with a
    /// `"no rows returned"` message.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmptyQuery`] for blank input.
    /// - [`EngineError::NotReady`] if no live handle exists.
    /// - [`EngineError::Sql`] with the engine's diagnostic text for
    ///   malformed SQL. Statements before the failing one stay applied.
    pub fn execute_query(&self, text: &str) -> Result<QueryResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(EngineError::EmptyQuery);
        }
        let conn = self.conn.as_ref().ok_or(EngineError::NotReady)?;

        let mut captured: Option<(Vec<String>, Vec<Vec<Value>>)> = None;
        let mut batch = Batch::new(conn, trimmed);
        while let Some(mut stmt) = batch.next()? {
            if stmt.column_count() == 0 {
                stmt.execute([])?;
                continue;
            }

            let columns: Vec<String> =
                stmt.column_names().iter().map(|c| c.to_string()).collect();
            let width = columns.len();

            let mut collected: Vec<Vec<Value>> = Vec::new();
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let mut cells = Vec::with_capacity(width);
                for i in 0..width {
                    cells.push(cell_from_sql(row.get_ref(i)?));
                }
                collected.push(cells);
            }

            // Statements that return no rows contribute no result set,
            // matching the exec semantics of the embedded engine the game
            // was designed around.
            if captured.is_none() && !collected.is_empty() {
                captured = Some((columns, collected));
            }
        }

        let result = match captured {
            Some((columns, rows)) => {
                debug!(rows = rows.len(), "query returned a result set");
                let message = format!("{} row(s) returned", rows.len());
                QueryResult {
                    columns,
                    rows,
                    message: Some(message),
                }
            }
            None => {
                debug!("query returned no result set");
                QueryResult::empty("no rows returned")
            }
        };
        Ok(result)
    }

    /// Destroys the current handle and reopens a freshly seeded database.
    ///
    /// Close failures are ignored; the handle is being discarded either
    /// way. On return, [`execute_query`](Self::execute_query) works
    /// immediately, or the adapter reports not-ready if reseeding failed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Sql`] if the replacement database cannot be
    /// opened or seeded. The adapter is left not-ready in that case.
    pub fn reset(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            let _ = conn.close();
        }
        let conn = open_seeded()?;
        self.conn = Some(conn);
        debug!("database reset and reseeded");
        Ok(())
    }
}

fn open_seeded() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SEED_SQL)?;
    Ok(conn)
}

fn cell_from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(n) => Value::Real(n),
        ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        // The seed contains no blobs; render player-created ones as lossy text.
        ValueRef::Blob(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}
