use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::rules::{ActionCounts, PhaseScores, Ruleset, compute_phase_scores};
use crate::store::keys::SCOUTING_DATA;
use crate::store::{Store, StoreExt};

/// One scout's observation of one robot in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutingEntry {
    pub team_number: u32,
    pub match_number: u32,
    #[serde(default)]
    pub auto: ActionCounts,
    #[serde(default)]
    pub teleop: ActionCounts,
    #[serde(default)]
    pub endgame: ActionCounts,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ScoutingEntry {
    pub fn new(team_number: u32, match_number: u32) -> Self {
        Self {
            team_number,
            match_number,
            auto: ActionCounts::new(),
            teleop: ActionCounts::new(),
            endgame: ActionCounts::new(),
            notes: String::new(),
            timestamp: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.team_number == 0 {
            return Err(Error::validation("team number must be positive"));
        }
        if self.match_number == 0 {
            return Err(Error::validation("match number must be positive"));
        }
        self.auto.validate()?;
        self.teleop.validate()?;
        self.endgame.validate()
    }

    #[must_use]
    pub fn scores(&self, ruleset: &Ruleset) -> PhaseScores {
        compute_phase_scores(ruleset, &self.auto, &self.teleop, &self.endgame)
    }
}

/// Append-only collection of scouting entries.
pub struct ScoutingLog {
    store: Arc<dyn Store>,
}

impl ScoutingLog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<ScoutingEntry>> {
        self.store.load_or_default(SCOUTING_DATA)
    }

    pub fn for_team(&self, team_number: u32) -> Result<Vec<ScoutingEntry>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|entry| entry.team_number == team_number)
            .collect())
    }

    /// Adds an entry; a team is scouted at most once per match.
    pub fn append(&self, mut entry: ScoutingEntry) -> Result<ScoutingEntry> {
        entry.validate()?;

        let mut entries = self.list()?;
        if entries
            .iter()
            .any(|e| e.team_number == entry.team_number && e.match_number == entry.match_number)
        {
            return Err(Error::Validation(format!(
                "team {} is already scouted for match {}",
                entry.team_number, entry.match_number
            )));
        }

        entry.timestamp.get_or_insert_with(Utc::now);
        entries.push(entry.clone());
        self.store.save(SCOUTING_DATA, &entries)?;

        info!(
            team = entry.team_number,
            match_number = entry.match_number,
            "scouting entry recorded"
        );
        Ok(entry)
    }
}
