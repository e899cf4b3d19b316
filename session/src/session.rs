//! The session reducer: level progression, answer verification, and the
//! countdown timer behind one ordered event queue.
//!
//! All mutation of [`SessionState`] flows through [`Session::apply`].
//! Timer ticks and submissions are two independent event sources; funneling
//! both through the same reducer serializes them, so a tick that forces
//! failure is applied before any later submission and a submission applied
//! after failure is rejected rather than resurrecting a completed level.

use tracing::{debug, info};

use queryquest_core::{
    Level, MISMATCH_FALLBACK_HINT, analyze_empty_result, analyze_mismatch, results_match,
    validate_levels,
};
use queryquest_engine::{SqlEngine, TABLE_LISTING_SQL};

use crate::error::{Result, SessionError};
use crate::feedback::Feedback;
use crate::levels::mystery_campaign;
use crate::state::{SessionState, TIME_BUDGET_SECONDS};

/// An input to the session reducer.
///
/// Events are applied strictly in the order handed to
/// [`Session::apply`]; that ordering is the concurrency model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The explicit begin action; the timer does not run before this.
    Begin,
    /// A query submission to verify against the current level's target.
    Submit(String),
    /// Shell input: `ls` / `ls tables` / `hint` aliases, or raw SQL run
    /// without target verification.
    Shell(String),
    /// One whole second of real time elapsed.
    Tick,
    /// Navigate to an unlocked level (zero-based index).
    SelectLevel(usize),
    /// The manual overlay opened; suspends the timer.
    OpenManual,
    /// The manual overlay closed; resumes the timer.
    CloseManual,
    /// Manual database reseed, independent of progression.
    ResetDatabase,
    /// Soft reset out of the failed state: back to level 1 with a fresh
    /// database and full timer.
    Retry,
    /// Hard reset out of the mission-complete state: everything back to
    /// the start, unlocks included.
    RestartMission,
}

/// A running game session: the static level sequence, the mutable session
/// state, and the owned engine adapter.
///
/// # Examples
///
/// ```
/// use queryquest_session::{Event, Feedback, Session};
///
/// let mut session = Session::mystery().unwrap();
/// session.apply(Event::Begin);
///
/// let feedback = session.apply(Event::Submit(
///     "SELECT * FROM building_access_logs WHERE access_granted = 0;".into(),
/// ));
/// assert!(feedback.iter().any(|f| matches!(f, Feedback::LevelComplete { level_id: 1 })));
/// assert_eq!(session.state().current_level, 1);
/// ```
pub struct Session {
    engine: SqlEngine,
    levels: Vec<Level>,
    state: SessionState,
    budget: u32,
}

impl Session {
    /// Creates a session over the given level pack with the default
    /// 75-second budget.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidLevels`] if the pack fails
    /// structural validation, or [`SessionError::Engine`] if the database
    /// cannot be opened and seeded.
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        Self::with_budget(levels, TIME_BUDGET_SECONDS)
    }

    /// Creates a session with a custom per-attempt time budget in seconds.
    pub fn with_budget(levels: Vec<Level>, budget: u32) -> Result<Self> {
        let errors = validate_levels(&levels);
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SessionError::InvalidLevels(joined));
        }
        Ok(Self {
            engine: SqlEngine::new()?,
            levels,
            state: SessionState::new(budget),
            budget,
        })
    }

    /// Creates a session over the built-in mystery campaign.
    pub fn mystery() -> Result<Self> {
        Self::new(mystery_campaign()?)
    }

    /// The current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The level the progression cursor points at.
    pub fn current_level(&self) -> &Level {
        &self.levels[self.state.current_level]
    }

    /// The full static level sequence.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Whether the engine adapter has a live database handle.
    pub fn engine_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Applies one event and returns the feedback to render, in
    /// presentation order. Events that are not valid in the current state
    /// (a submission after failure, selecting a locked level, retrying
    /// outside the failed state) are no-ops returning no feedback.
    pub fn apply(&mut self, event: Event) -> Vec<Feedback> {
        match event {
            Event::Begin => self.begin(),
            Event::Submit(text) => self.submit(&text),
            Event::Shell(input) => self.shell(&input),
            Event::Tick => self.tick(),
            Event::SelectLevel(index) => self.select_level(index),
            Event::OpenManual => {
                self.state.paused = true;
                Vec::new()
            }
            Event::CloseManual => {
                self.state.paused = false;
                Vec::new()
            }
            Event::ResetDatabase => self.reset_database(),
            Event::Retry => self.retry(),
            Event::RestartMission => self.restart_mission(),
        }
    }

    fn begin(&mut self) -> Vec<Feedback> {
        if !self.state.started {
            self.state.started = true;
            info!("session started");
        }
        Vec::new()
    }

    fn tick(&mut self) -> Vec<Feedback> {
        let s = &mut self.state;
        if !s.started || s.paused || s.failed || s.mission_complete {
            return Vec::new();
        }
        if s.timer <= 1 {
            s.timer = 0;
            s.failed = true;
            info!("timer expired, session failed");
            return vec![Feedback::SystemFailure];
        }
        s.timer -= 1;
        Vec::new()
    }

    fn submit(&mut self, text: &str) -> Vec<Feedback> {
        if !self.state.started || self.state.is_terminal() {
            debug!("submission ignored in current state");
            return Vec::new();
        }

        let result = match self.engine.execute_query(text) {
            Ok(result) => result,
            Err(e) => return vec![Feedback::QueryFailed(e.to_string())],
        };

        let level = &self.levels[self.state.current_level];
        if !results_match(Some(&result), &level.target) {
            let hint = if let Some(expected) = &level.expected_query {
                analyze_mismatch(text, expected).hint.to_string()
            } else if result.rows.is_empty() {
                analyze_empty_result(text).to_string()
            } else {
                MISMATCH_FALLBACK_HINT.to_string()
            };
            return vec![Feedback::Results(result), Feedback::Hint(hint)];
        }

        let level_id = level.id;
        let last_index = self.levels.len() - 1;
        let mut feedback = vec![Feedback::Results(result), Feedback::LevelComplete { level_id }];

        if self.state.current_level == self.state.max_unlocked
            && self.state.current_level < last_index
        {
            let next = self.state.current_level + 1;
            self.state.max_unlocked = next;
            self.state.current_level = next;
            self.state.timer = self.budget;
            info!(level = self.levels[next].id, "advanced to next level");
            feedback.push(Feedback::CachePurge);
            feedback.push(Feedback::Advanced {
                level_id: self.levels[next].id,
            });
        } else if self.state.current_level == last_index {
            self.state.mission_complete = true;
            info!("mission complete");
            feedback.push(Feedback::MissionComplete);
        } else {
            // Replaying an already-cleared level: acknowledged, but
            // progression does not move.
            debug!(level = level_id, "replayed cleared level");
        }

        feedback
    }

    fn shell(&mut self, input: &str) -> Vec<Feedback> {
        if !self.state.started || self.state.is_terminal() {
            debug!("shell input ignored in current state");
            return Vec::new();
        }
        let raw = input.trim();
        if raw.is_empty() {
            return Vec::new();
        }

        let query = match raw.to_lowercase().as_str() {
            // Static hint text, no engine round trip.
            "hint" => return vec![Feedback::Hint(self.current_level().hint.clone())],
            "ls" | "ls tables" => TABLE_LISTING_SQL,
            _ => raw,
        };

        // The shell path executes without target verification and never
        // advances progression.
        match self.engine.execute_query(query) {
            Ok(result) => vec![Feedback::Results(result)],
            Err(e) => vec![Feedback::QueryFailed(e.to_string())],
        }
    }

    fn select_level(&mut self, index: usize) -> Vec<Feedback> {
        if !self.state.started || self.state.is_terminal() {
            return Vec::new();
        }
        if index < self.levels.len() && self.state.is_unlocked(index) {
            self.state.current_level = index;
            debug!(level = self.levels[index].id, "navigated to level");
        }
        Vec::new()
    }

    fn reset_database(&mut self) -> Vec<Feedback> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        match self.engine.reset() {
            Ok(()) => vec![Feedback::DatabaseReset],
            Err(e) => vec![Feedback::QueryFailed(e.to_string())],
        }
    }

    fn retry(&mut self) -> Vec<Feedback> {
        if !self.state.failed {
            return Vec::new();
        }
        self.state.failed = false;
        self.state.timer = self.budget;
        self.state.current_level = 0;
        info!("retry: soft reset to level 1");
        match self.engine.reset() {
            Ok(()) => vec![Feedback::DatabaseReset],
            Err(e) => vec![Feedback::QueryFailed(e.to_string())],
        }
    }

    fn restart_mission(&mut self) -> Vec<Feedback> {
        if !self.state.mission_complete {
            return Vec::new();
        }
        self.state = SessionState::new(self.budget);
        info!("mission restart: hard reset");
        match self.engine.reset() {
            Ok(()) => vec![Feedback::DatabaseReset],
            Err(e) => vec![Feedback::QueryFailed(e.to_string())],
        }
    }
}
