//! SQLite engine adapter for the QueryQuest SQL game.
//!
//! Wraps the external embedded SQL engine ([`rusqlite`]) behind the two
//! capabilities the game core consumes: query execution and destructive
//! reset. The adapter owns the single live in-memory database handle and
//! reseeds the fixed mystery schema + data script on every reset.
//!
//! # Example
//!
//! ```
//! use queryquest_engine::SqlEngine;
//!
//! let mut engine = SqlEngine::new().unwrap();
//! let result = engine
//!     .execute_query("SELECT * FROM building_access_logs WHERE access_granted = 0;")
//!     .unwrap();
//! assert_eq!(result.rows.len(), 1);
//!
//! // Reset wipes any player mutations and replays the seed verbatim.
//! engine.reset().unwrap();
//! ```

mod adapter;
mod error;

pub use adapter::{SEED_SQL, SqlEngine, TABLE_LISTING_SQL};
pub use error::{EngineError, Result};
