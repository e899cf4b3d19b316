//! Level pack loading: the built-in mystery campaign and external JSON
//! packs.
//!
//! A pack is a JSON array of levels (see
//! [`Level`](queryquest_core::Level) for the field layout). Packs are
//! validated structurally on load; a session never starts on a malformed
//! pack.

use std::path::Path;

use queryquest_core::{Level, validate_levels};

use crate::error::PackError;

/// The built-in six-level station mystery campaign, embedded at build
/// time. Its targets are derived from the engine's seed data.
pub const MYSTERY_CAMPAIGN_JSON: &str = include_str!("../levels/mystery.json");

/// Parses and validates the built-in campaign.
///
/// # Errors
///
/// Returns [`PackError`] only if the embedded asset is corrupt, which a
/// test guards against.
pub fn mystery_campaign() -> Result<Vec<Level>, PackError> {
    parse_pack(MYSTERY_CAMPAIGN_JSON)
}

/// Loads and validates a level pack from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use queryquest_session::load_pack;
///
/// let levels = load_pack("packs/custom.json").unwrap();
/// println!("{} levels loaded", levels.len());
/// ```
pub fn load_pack(path: impl AsRef<Path>) -> Result<Vec<Level>, PackError> {
    let json = std::fs::read_to_string(path)?;
    parse_pack(&json)
}

fn parse_pack(json: &str) -> Result<Vec<Level>, PackError> {
    let levels: Vec<Level> = serde_json::from_str(json)?;
    let errors = validate_levels(&levels);
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(PackError::Invalid(joined));
    }
    Ok(levels)
}
