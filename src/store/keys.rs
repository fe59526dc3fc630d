//! Persisted key schema.

use crate::error::{Error, Result};

pub const TEAMS: &str = "teams";
pub const MATCH_DATA: &str = "match_data";
pub const QUICK_SCORES: &str = "quick_scores";
pub const SCOUTING_DATA: &str = "scouting_data";
pub const HEATMAPS: &str = "heatmaps";
pub const TEAM_HEATMAPS: &str = "team_heatmaps";
pub const TEAM_STRATEGIES: &str = "team_strategies";
pub const APP_SETTINGS: &str = "app_settings";
pub const MATCH_ANALYSIS: &str = "match_analysis";
pub const TEAM_NOTES: &str = "team_notes";
pub const TEAM_MATCH_ANALYSIS: &str = "team_match_analysis";

const STRATEGY_PREFIX: &str = "strategy_";
const MAX_KEY_LEN: usize = 255;

/// Key of a per-team strategy profile.
pub fn strategy_key(team_number: u32) -> String {
    format!("{STRATEGY_PREFIX}{team_number}")
}

/// Team number encoded in a per-team strategy key, if `key` is one.
pub fn parse_strategy_key(key: &str) -> Option<u32> {
    key.strip_prefix(STRATEGY_PREFIX)?.parse().ok()
}

pub fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::Validation("Key cannot be empty".to_string()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(Error::Validation(format!(
            "Key cannot exceed {MAX_KEY_LEN} characters"
        )));
    }

    if key.chars().any(char::is_control) {
        return Err(Error::Validation(
            "Key contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
