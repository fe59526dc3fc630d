use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::{ActionCounts, ActionValue, Ruleset, compute_phase_scores};
use crate::types::Phase;

/// Alliance-level action tallies kept while a match is being watched.
///
/// `total` is derived: every edit through [`QuickScore::update_score`]
/// recomputes it from the counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickScore {
    #[serde(default)]
    pub auto: ActionCounts,
    #[serde(default)]
    pub teleop: ActionCounts,
    #[serde(default)]
    pub endgame: ActionCounts,
    #[serde(default)]
    pub total: u32,
}

impl QuickScore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn counts(&self, phase: Phase) -> &ActionCounts {
        match phase {
            Phase::Auto => &self.auto,
            Phase::Teleop => &self.teleop,
            Phase::Endgame => &self.endgame,
        }
    }

    fn counts_mut(&mut self, phase: Phase) -> &mut ActionCounts {
        match phase {
            Phase::Auto => &mut self.auto,
            Phase::Teleop => &mut self.teleop,
            Phase::Endgame => &mut self.endgame,
        }
    }

    /// Sets one action and returns the new total. A negative count is
    /// rejected and leaves the score untouched.
    pub fn update_score(
        &mut self,
        ruleset: &Ruleset,
        phase: Phase,
        field: &str,
        value: impl Into<ActionValue>,
    ) -> Result<u32> {
        let value = value.into();
        ActionCounts::new().with(field, value).validate()?;

        self.counts_mut(phase).set(field, value);
        self.recompute(ruleset);
        Ok(self.total)
    }

    pub fn recompute(&mut self, ruleset: &Ruleset) -> u32 {
        self.total = compute_phase_scores(ruleset, &self.auto, &self.teleop, &self.endgame).total();
        self.total
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<()> {
        self.auto.validate()?;
        self.teleop.validate()?;
        self.endgame.validate()
    }
}

/// Both alliances' quick scores for one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickScorePair {
    pub red: QuickScore,
    pub blue: QuickScore,
}
