//! Level progression, answer verification, and session timing for the
//! QueryQuest SQL game.
//!
//! The centerpiece is [`Session`]: it owns the engine adapter, the static
//! level sequence, and the mutable [`SessionState`], and funnels every
//! input (submissions, shell commands, timer ticks, retries) through the
//! single-writer reducer [`Session::apply`]. Serializing the two
//! independent event sources (timer and submissions) onto one queue is
//! what guarantees a timer expiry always wins over an in-flight
//! submission's result.
//!
//! # Example
//!
//! ```
//! use queryquest_session::{Event, Feedback, Session};
//!
//! let mut session = Session::mystery().unwrap();
//! session.apply(Event::Begin);
//!
//! // A wrong-but-executable query yields the result set and a hint.
//! let feedback = session.apply(Event::Submit("SELECT * FROM employees;".into()));
//! assert!(matches!(feedback.last(), Some(Feedback::Hint(_))));
//! ```

mod error;
mod feedback;
mod levels;
mod session;
mod state;

pub use error::{PackError, Result, SessionError};
pub use feedback::{CACHE_PURGE_PLACEHOLDER, Feedback};
pub use levels::{MYSTERY_CAMPAIGN_JSON, load_pack, mystery_campaign};
pub use session::{Event, Session};
pub use state::{SessionState, TIME_BUDGET_SECONDS};
