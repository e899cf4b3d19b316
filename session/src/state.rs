//! Session state: the progression cursor, unlock high-water mark, and
//! countdown timer.

use serde::{Deserialize, Serialize};

/// Seconds on the clock for each level attempt (same budget every level).
pub const TIME_BUDGET_SECONDS: u32 = 75;

/// Mutable per-session state.
///
/// Created at game start and mutated only by the session reducer.
/// Invariant: `current_level <= max_unlocked` at all times; the player can
/// revisit unlocked levels but never skip ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Zero-based index of the level currently being played.
    pub current_level: usize,
    /// Zero-based index of the highest unlocked level.
    pub max_unlocked: usize,
    /// Remaining whole seconds before the session fails.
    pub timer: u32,
    /// Whether the explicit begin action has happened. The timer only
    /// runs once the game has started.
    pub started: bool,
    /// Whether an auxiliary overlay (the manual) is suspending the timer.
    pub paused: bool,
    /// Terminal failure state; recoverable only via retry.
    pub failed: bool,
    /// Terminal success state; recoverable only via mission restart.
    pub mission_complete: bool,
}

impl SessionState {
    /// Fresh state at the start of level 1 with a full timer.
    pub fn new(budget: u32) -> Self {
        Self {
            current_level: 0,
            max_unlocked: 0,
            timer: budget,
            started: false,
            paused: false,
            failed: false,
            mission_complete: false,
        }
    }

    /// Whether the level at `index` may be navigated to.
    pub fn is_unlocked(&self, index: usize) -> bool {
        index <= self.max_unlocked
    }

    /// Whether the session is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.failed || self.mission_complete
    }
}
