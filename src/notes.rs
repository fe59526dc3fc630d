//! Free-text scouting notes and match analysis.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::matches::MatchRecordStore;
use crate::store::keys::{MATCH_ANALYSIS, TEAM_MATCH_ANALYSIS, TEAM_NOTES};
use crate::store::{Store, StoreExt};

pub const DEFENSE_RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
const DEFAULT_DEFENSE_RATING: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A team's analysis of its own play in one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub id: String,
    pub match_number: u32,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMatchPerformance {
    #[serde(default)]
    pub auto_points: u32,
    #[serde(default)]
    pub teleop_points: u32,
    #[serde(default)]
    pub endgame_points: u32,
    #[serde(default = "default_defense_rating")]
    pub defense_rating: u8,
    #[serde(default)]
    pub notes: String,
}

fn default_defense_rating() -> u8 {
    DEFAULT_DEFENSE_RATING
}

impl Default for TeamMatchPerformance {
    fn default() -> Self {
        Self {
            auto_points: 0,
            teleop_points: 0,
            endgame_points: 0,
            defense_rating: DEFAULT_DEFENSE_RATING,
            notes: String::new(),
        }
    }
}

impl TeamMatchPerformance {
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.auto_points
            .saturating_add(self.teleop_points)
            .saturating_add(self.endgame_points)
    }
}

/// Quick post-match write-up covering every robot on the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub match_number: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub team_performance: BTreeMap<u32, TeamMatchPerformance>,
    pub timestamp: DateTime<Utc>,
}

pub(crate) type TeamNotes = BTreeMap<u32, Vec<Note>>;
pub(crate) type TeamAnalyses = BTreeMap<u32, Vec<AnalysisEntry>>;
pub(crate) type MatchAnalyses = BTreeMap<u32, MatchAnalysis>;

fn require_text(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::validation("text cannot be empty"));
    }
    Ok(text.to_string())
}

pub struct NoteBook {
    store: Arc<dyn Store>,
}

impl NoteBook {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Analyses belong to a scheduled match, so the match must exist.
    fn require_match(&self, match_number: u32) -> Result<()> {
        if match_number == 0 {
            return Err(Error::validation("no match selected"));
        }
        MatchRecordStore::new(self.store.clone()).get(match_number)?;
        Ok(())
    }

    // Team notes

    pub fn notes(&self, team_number: u32) -> Result<Vec<Note>> {
        let mut all: TeamNotes = self.store.load_or_default(TEAM_NOTES)?;
        Ok(all.remove(&team_number).unwrap_or_default())
    }

    pub fn add_note(&self, team_number: u32, text: &str) -> Result<Note> {
        let note = Note {
            id: Uuid::new_v4().to_string(),
            text: require_text(text)?,
            timestamp: Utc::now(),
        };

        let mut all: TeamNotes = self.store.load_or_default(TEAM_NOTES)?;
        all.entry(team_number).or_default().push(note.clone());
        self.store.save(TEAM_NOTES, &all)?;

        info!(team = team_number, id = %note.id, "note added");
        Ok(note)
    }

    pub fn edit_note(&self, team_number: u32, id: &str, text: &str) -> Result<Note> {
        let text = require_text(text)?;
        let mut all: TeamNotes = self.store.load_or_default(TEAM_NOTES)?;

        let note = all
            .get_mut(&team_number)
            .and_then(|notes| notes.iter_mut().find(|n| n.id == id))
            .ok_or_else(|| Error::not_found(format!("note {id} for team {team_number}")))?;
        note.text = text;
        let updated = note.clone();

        self.store.save(TEAM_NOTES, &all)?;
        Ok(updated)
    }

    pub fn delete_note(&self, team_number: u32, id: &str) -> Result<()> {
        let mut all: TeamNotes = self.store.load_or_default(TEAM_NOTES)?;
        let notes = all.get_mut(&team_number);
        let removed = notes.is_some_and(|notes| {
            let before = notes.len();
            notes.retain(|n| n.id != id);
            notes.len() != before
        });
        if !removed {
            return Err(Error::not_found(format!("note {id} for team {team_number}")));
        }
        if all.get(&team_number).is_some_and(Vec::is_empty) {
            all.remove(&team_number);
        }

        self.store.save(TEAM_NOTES, &all)?;
        info!(team = team_number, id, "note deleted");
        Ok(())
    }

    // Per-team match analysis

    pub fn analyses(&self, team_number: u32) -> Result<Vec<AnalysisEntry>> {
        let mut all: TeamAnalyses = self.store.load_or_default(TEAM_MATCH_ANALYSIS)?;
        Ok(all.remove(&team_number).unwrap_or_default())
    }

    pub fn add_analysis(
        &self,
        team_number: u32,
        match_number: u32,
        text: &str,
    ) -> Result<AnalysisEntry> {
        self.require_match(match_number)?;
        let entry = AnalysisEntry {
            id: Uuid::new_v4().to_string(),
            match_number,
            text: require_text(text)?,
            timestamp: Utc::now(),
        };

        let mut all: TeamAnalyses = self.store.load_or_default(TEAM_MATCH_ANALYSIS)?;
        all.entry(team_number).or_default().push(entry.clone());
        self.store.save(TEAM_MATCH_ANALYSIS, &all)?;

        info!(team = team_number, match_number, "match analysis added");
        Ok(entry)
    }

    pub fn delete_analysis(&self, team_number: u32, id: &str) -> Result<()> {
        let mut all: TeamAnalyses = self.store.load_or_default(TEAM_MATCH_ANALYSIS)?;
        let entries = all
            .get_mut(&team_number)
            .ok_or_else(|| Error::not_found(format!("analysis {id} for team {team_number}")))?;

        let before = entries.len();
        entries.retain(|a| a.id != id);
        if entries.len() == before {
            return Err(Error::not_found(format!(
                "analysis {id} for team {team_number}"
            )));
        }
        if entries.is_empty() {
            all.remove(&team_number);
        }

        self.store.save(TEAM_MATCH_ANALYSIS, &all)
    }

    // Whole-match quick analysis

    pub fn match_analysis(&self, match_number: u32) -> Result<Option<MatchAnalysis>> {
        let mut all: MatchAnalyses = self.store.load_or_default(MATCH_ANALYSIS)?;
        Ok(all.remove(&match_number))
    }

    /// Replaces the analysis for a match. Defense ratings must be 1-5.
    pub fn save_match_analysis(
        &self,
        match_number: u32,
        notes: &str,
        team_performance: BTreeMap<u32, TeamMatchPerformance>,
    ) -> Result<MatchAnalysis> {
        self.require_match(match_number)?;
        if let Some((team, perf)) = team_performance
            .iter()
            .find(|(_, perf)| !DEFENSE_RATING_RANGE.contains(&perf.defense_rating))
        {
            return Err(Error::Validation(format!(
                "defense rating for team {team} must be 1-5, got {}",
                perf.defense_rating
            )));
        }

        let analysis = MatchAnalysis {
            match_number,
            notes: notes.to_string(),
            team_performance,
            timestamp: Utc::now(),
        };

        let mut all: MatchAnalyses = self.store.load_or_default(MATCH_ANALYSIS)?;
        all.insert(match_number, analysis.clone());
        self.store.save(MATCH_ANALYSIS, &all)?;

        info!(match_number, "match analysis saved");
        Ok(analysis)
    }
}
