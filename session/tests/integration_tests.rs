//! Integration tests for the queryquest-session crate: full progression
//! scenarios against the built-in campaign and the live seeded engine.

use std::io::Write;

use queryquest_core::Value;
use queryquest_session::{Event, Feedback, Session, TIME_BUDGET_SECONDS, load_pack};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn started_session() -> Session {
    let mut session = Session::mystery().expect("built-in campaign loads");
    session.apply(Event::Begin);
    session
}

/// The reference solution for each built-in level doubles as its hint, so
/// submitting it must always clear the level.
fn solve_current_level(session: &mut Session) -> Vec<Feedback> {
    let solution = session
        .current_level()
        .expected_query
        .clone()
        .expect("built-in levels carry reference solutions");
    session.apply(Event::Submit(solution))
}

fn fail_session(session: &mut Session) {
    loop {
        let feedback = session.apply(Event::Tick);
        if feedback.contains(&Feedback::SystemFailure) {
            return;
        }
    }
}

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

#[test]
fn test_level_one_solution_advances_and_resets_timer() {
    let mut session = started_session();

    // Burn some clock first so the reset is observable.
    for _ in 0..10 {
        session.apply(Event::Tick);
    }
    assert_eq!(session.state().timer, TIME_BUDGET_SECONDS - 10);

    let feedback = session.apply(Event::Submit(
        "SELECT * FROM building_access_logs WHERE access_granted = 0;".into(),
    ));

    // Result set, completion, purge transition, advancement, in order.
    match feedback.as_slice() {
        [
            Feedback::Results(result),
            Feedback::LevelComplete { level_id: 1 },
            Feedback::CachePurge,
            Feedback::Advanced { level_id: 2 },
        ] => {
            assert_eq!(result.rows.len(), 1);
            assert_eq!(result.rows[0][3], Value::Text("Server Room A".into()));
        }
        other => panic!("unexpected feedback: {other:?}"),
    }

    assert_eq!(session.state().current_level, 1);
    assert_eq!(session.state().max_unlocked, 1);
    assert_eq!(session.state().timer, TIME_BUDGET_SECONDS);
}

#[test]
fn test_full_campaign_run_reaches_mission_complete() {
    let mut session = started_session();
    let total = session.levels().len();

    for index in 0..total {
        assert_eq!(session.state().current_level, index);
        let feedback = solve_current_level(&mut session);
        assert!(
            feedback
                .iter()
                .any(|f| matches!(f, Feedback::LevelComplete { .. })),
            "level {} did not complete: {feedback:?}",
            index + 1
        );
    }

    assert!(session.state().mission_complete);
    assert_eq!(session.state().max_unlocked, total - 1);
}

#[test]
fn test_replaying_cleared_level_is_idempotent() {
    let mut session = started_session();
    solve_current_level(&mut session);
    solve_current_level(&mut session);
    assert_eq!(session.state().max_unlocked, 2);

    // Go back to level 1 and clear it again.
    session.apply(Event::SelectLevel(0));
    let feedback = solve_current_level(&mut session);
    assert!(
        feedback
            .iter()
            .any(|f| matches!(f, Feedback::LevelComplete { level_id: 1 }))
    );
    // Acknowledged, but no re-advancement: cursor and unlock stay put.
    assert_eq!(session.state().current_level, 0);
    assert_eq!(session.state().max_unlocked, 2);
    assert!(!feedback.iter().any(|f| matches!(f, Feedback::Advanced { .. })));
}

#[test]
fn test_unlocked_levels_are_navigable_locked_ones_not() {
    let mut session = started_session();
    solve_current_level(&mut session);
    assert_eq!(session.state().current_level, 1);

    session.apply(Event::SelectLevel(0));
    assert_eq!(session.state().current_level, 0);

    session.apply(Event::SelectLevel(5));
    assert_eq!(session.state().current_level, 0);
}

// ---------------------------------------------------------------------------
// Timer and failure escalation
// ---------------------------------------------------------------------------

#[test]
fn test_timer_forces_failure_exactly_once() {
    let mut session = Session::with_budget(
        queryquest_session::mystery_campaign().unwrap(),
        2,
    )
    .unwrap();
    session.apply(Event::Begin);

    assert!(session.apply(Event::Tick).is_empty());
    assert!(!session.state().failed);

    let feedback = session.apply(Event::Tick);
    assert_eq!(feedback, vec![Feedback::SystemFailure]);
    assert!(session.state().failed);
    assert_eq!(session.state().timer, 0);

    // A third tick must not re-fire the failure side effect.
    assert!(session.apply(Event::Tick).is_empty());
}

#[test]
fn test_timer_does_not_run_before_begin() {
    let mut session = Session::mystery().unwrap();
    session.apply(Event::Tick);
    assert_eq!(session.state().timer, TIME_BUDGET_SECONDS);
}

#[test]
fn test_submission_after_failure_cannot_resurrect_the_level() {
    let mut session = started_session();
    fail_session(&mut session);

    // The correct level 1 answer arrives after failure was declared.
    let feedback = session.apply(Event::Submit(
        "SELECT * FROM building_access_logs WHERE access_granted = 0;".into(),
    ));
    assert!(feedback.is_empty());
    assert!(session.state().failed);
    assert_eq!(session.state().max_unlocked, 0);
}

#[test]
fn test_ticks_are_ignored_after_mission_complete() {
    let mut session = started_session();
    for _ in 0..session.levels().len() {
        solve_current_level(&mut session);
    }
    assert!(session.state().mission_complete);

    for _ in 0..(TIME_BUDGET_SECONDS + 5) {
        assert!(session.apply(Event::Tick).is_empty());
    }
    assert!(!session.state().failed);
}

// ---------------------------------------------------------------------------
// Retry and mission restart
// ---------------------------------------------------------------------------

#[test]
fn test_retry_resets_to_level_one_with_fresh_database() {
    let mut session = started_session();
    solve_current_level(&mut session);
    // Leave a player-created table behind, then fail.
    session.apply(Event::Shell("CREATE TABLE graffiti (x INTEGER);".into()));
    fail_session(&mut session);

    let feedback = session.apply(Event::Retry);
    assert_eq!(feedback, vec![Feedback::DatabaseReset]);

    assert!(!session.state().failed);
    assert_eq!(session.state().current_level, 0);
    assert_eq!(session.state().timer, TIME_BUDGET_SECONDS);
    // Soft reset: the unlock high-water mark survives.
    assert_eq!(session.state().max_unlocked, 1);

    // The reseed wiped the player's table.
    let feedback = session.apply(Event::Shell("SELECT * FROM graffiti;".into()));
    assert!(matches!(feedback.as_slice(), [Feedback::QueryFailed(_)]));
}

#[test]
fn test_restart_mission_resets_everything() {
    let mut session = started_session();
    for _ in 0..session.levels().len() {
        solve_current_level(&mut session);
    }
    assert!(session.state().mission_complete);

    let feedback = session.apply(Event::RestartMission);
    assert_eq!(feedback, vec![Feedback::DatabaseReset]);

    let state = session.state();
    assert!(!state.mission_complete);
    assert!(!state.started);
    assert_eq!(state.current_level, 0);
    assert_eq!(state.max_unlocked, 0);
    assert_eq!(state.timer, TIME_BUDGET_SECONDS);
}

// ---------------------------------------------------------------------------
// External level packs
// ---------------------------------------------------------------------------

#[test]
fn test_custom_pack_loads_from_disk_and_plays() {
    let json = r#"[{
        "id": 1,
        "title": "Warmup",
        "description": "Count the crew.",
        "hint": "SELECT COUNT(*) AS n FROM employees;",
        "expected_query": "SELECT COUNT(*) AS n FROM employees;",
        "target": { "columns": ["n"], "rows": [[7]] }
    }]"#;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warmup.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let levels = load_pack(&path).unwrap();
    let mut session = Session::new(levels).unwrap();
    session.apply(Event::Begin);

    let feedback = session.apply(Event::Submit("SELECT COUNT(*) AS n FROM employees;".into()));
    assert!(
        feedback
            .iter()
            .any(|f| matches!(f, Feedback::MissionComplete))
    );
}

#[test]
fn test_invalid_pack_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"id\": 7}]").unwrap();
    assert!(load_pack(&path).is_err());
}
