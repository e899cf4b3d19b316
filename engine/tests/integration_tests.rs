//! Integration tests for the queryquest-engine crate: seed data contract
//! checks that level targets depend on.

use queryquest_core::Value;
use queryquest_engine::{EngineError, SqlEngine};

fn engine() -> SqlEngine {
    SqlEngine::new().expect("in-memory engine opens and seeds")
}

// ---------------------------------------------------------------------------
// Seed data contract
// ---------------------------------------------------------------------------

#[test]
fn test_denied_access_row_matches_level_one_target() {
    let result = engine()
        .execute_query("SELECT * FROM building_access_logs WHERE access_granted = 0;")
        .unwrap();

    assert_eq!(
        result.columns,
        vec!["id", "employee_id", "access_time", "room_name", "access_granted"]
    );
    assert_eq!(
        result.rows,
        vec![vec![
            Value::Integer(6),
            Value::Integer(2),
            Value::Text("2023-10-24 23:05:00".into()),
            Value::Text("Server Room A".into()),
            Value::Integer(0),
        ]]
    );
}

#[test]
fn test_gravity_drops_below_half_g_twice() {
    let result = engine()
        .execute_query(
            "SELECT timestamp FROM system_metrics WHERE metric_name = 'Gravity' AND value < 0.5;",
        )
        .unwrap();
    assert_eq!(
        result.rows,
        vec![
            vec![Value::Text("2023-10-24 23:30:00".into())],
            vec![Value::Text("2023-10-24 23:45:00".into())],
        ]
    );
}

#[test]
fn test_highest_radiation_reading_is_cargo_bay() {
    let result = engine()
        .execute_query(
            "SELECT location FROM sensor_logs WHERE sensor_type = 'Radiation' \
             ORDER BY reading DESC LIMIT 1;",
        )
        .unwrap();
    assert_eq!(result.rows, vec![vec![Value::Text("Cargo Bay".into())]]);
}

#[test]
fn test_airlock_access_joins_to_greg_sales() {
    let result = engine()
        .execute_query(
            "SELECT e.name FROM employees e JOIN building_access_logs b \
             ON e.id = b.employee_id WHERE b.room_name = 'Airlock_4';",
        )
        .unwrap();
    assert_eq!(result.rows, vec![vec![Value::Text("Greg Sales".into())]]);
}

#[test]
fn test_department_headcounts() {
    let result = engine()
        .execute_query(
            "SELECT department_id, COUNT(*) as count FROM employees GROUP BY department_id;",
        )
        .unwrap();
    assert_eq!(
        result.rows,
        vec![
            vec![Value::Integer(1), Value::Integer(3)],
            vec![Value::Integer(2), Value::Integer(1)],
            vec![Value::Integer(3), Value::Integer(1)],
            vec![Value::Integer(4), Value::Integer(1)],
            vec![Value::Integer(5), Value::Integer(1)],
        ]
    );
}

#[test]
fn test_rogue_process_pid() {
    let result = engine()
        .execute_query("SELECT pid FROM active_processes WHERE name = 'protocol_antigravity';")
        .unwrap();
    assert_eq!(result.rows, vec![vec![Value::Integer(404)]]);
}

// ---------------------------------------------------------------------------
// Reset semantics
// ---------------------------------------------------------------------------

#[test]
fn test_reset_replays_seed_after_destructive_player_sql() {
    let mut engine = engine();
    engine
        .execute_query("DELETE FROM building_access_logs; DROP TABLE sensor_logs;")
        .unwrap();
    assert!(matches!(
        engine.execute_query("SELECT * FROM sensor_logs;"),
        Err(EngineError::Sql(_))
    ));

    engine.reset().unwrap();

    let logs = engine
        .execute_query("SELECT COUNT(*) AS n FROM building_access_logs;")
        .unwrap();
    assert_eq!(logs.rows, vec![vec![Value::Integer(12)]]);
    let sensors = engine
        .execute_query("SELECT COUNT(*) AS n FROM sensor_logs;")
        .unwrap();
    assert_eq!(sensors.rows, vec![vec![Value::Integer(4)]]);
}

#[test]
fn test_execute_works_immediately_after_reset() {
    let mut engine = engine();
    for _ in 0..3 {
        engine.reset().unwrap();
        let result = engine.execute_query("SELECT 1 AS ok;").unwrap();
        assert_eq!(result.rows, vec![vec![Value::Integer(1)]]);
    }
}
