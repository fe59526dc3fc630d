use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::top_performer;
use crate::rules::Ruleset;
use crate::scouting::ScoutingEntry;
use crate::types::{Match, Team};

pub const UPCOMING_LIMIT: usize = 5;

/// Event-wide counters shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub teams_scouted: usize,
    pub matches_scouted: usize,
    pub completed_matches: usize,
    pub top_performer: Option<Team>,
    pub upcoming: Vec<Match>,
}

/// `matches` is expected in listing order; the first few become `upcoming`.
#[must_use]
pub fn dashboard_summary(
    ruleset: &Ruleset,
    entries: &[ScoutingEntry],
    matches: &[Match],
    teams: &[Team],
) -> DashboardSummary {
    let teams_scouted: BTreeSet<u32> = entries.iter().map(|e| e.team_number).collect();
    let matches_scouted: BTreeSet<u32> = entries.iter().map(|e| e.match_number).collect();

    DashboardSummary {
        teams_scouted: teams_scouted.len(),
        matches_scouted: matches_scouted.len(),
        completed_matches: matches.iter().filter(|m| m.is_completed()).count(),
        top_performer: top_performer(ruleset, entries, matches, teams).cloned(),
        upcoming: matches.iter().take(UPCOMING_LIMIT).cloned().collect(),
    }
}
