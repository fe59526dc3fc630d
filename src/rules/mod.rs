//! Season rulesets and the point calculator.
//!
//! Scoring never hard-codes point values: every calculation takes the
//! [`Ruleset`] to apply, so a new season only needs a new table.

pub mod builtin;
mod counts;

pub use counts::{ActionCounts, ActionValue};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::Phase;

/// Point values per action, per phase, for one competition season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,
    pub season: u16,
    #[serde(default)]
    pub auto: BTreeMap<String, u32>,
    #[serde(default)]
    pub teleop: BTreeMap<String, u32>,
    #[serde(default)]
    pub endgame: BTreeMap<String, u32>,
}

impl Ruleset {
    pub fn builtin(name: &str) -> Option<Ruleset> {
        match name {
            builtin::REEFSCAPE_2025 => Some(builtin::reefscape_2025()),
            builtin::CRESCENDO_2024 => Some(builtin::crescendo_2024()),
            _ => None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Ruleset> {
        let ruleset: Ruleset =
            toml::from_str(content).map_err(|e| Error::Config(format!("ruleset: {e}")))?;
        if ruleset.name.trim().is_empty() {
            return Err(Error::Config("ruleset name cannot be empty".to_string()));
        }
        for phase in Phase::ALL {
            if ruleset.table(phase).is_empty() {
                warn!(ruleset = %ruleset.name, %phase, "ruleset scores nothing in this phase");
            }
        }
        Ok(ruleset)
    }

    /// Resolves a built-in ruleset name, or else reads a TOML ruleset file.
    pub fn resolve(name_or_path: &str) -> Result<Ruleset> {
        if let Some(ruleset) = Self::builtin(name_or_path) {
            return Ok(ruleset);
        }

        let path = Path::new(name_or_path);
        if !path.is_file() {
            return Err(Error::Config(format!(
                "unknown ruleset '{name_or_path}' (built-ins: {})",
                builtin::NAMES.join(", ")
            )));
        }
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn table(&self, phase: Phase) -> &BTreeMap<String, u32> {
        match phase {
            Phase::Auto => &self.auto,
            Phase::Teleop => &self.teleop,
            Phase::Endgame => &self.endgame,
        }
    }

    #[must_use]
    pub fn points_for(&self, phase: Phase, action: &str) -> Option<u32> {
        self.table(phase).get(action).copied()
    }
}

/// Points scored in each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseScores {
    pub auto: u32,
    pub teleop: u32,
    pub endgame: u32,
}

impl PhaseScores {
    #[must_use]
    pub fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Auto => self.auto,
            Phase::Teleop => self.teleop,
            Phase::Endgame => self.endgame,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        compute_alliance_total(self)
    }
}

/// Weighted sum of one phase's actions. Actions the ruleset does not know
/// score nothing. Counts are expected to have passed
/// [`ActionCounts::validate`].
#[must_use]
pub fn compute_points(ruleset: &Ruleset, phase: Phase, counts: &ActionCounts) -> u32 {
    let table = ruleset.table(phase);
    let total: u64 = counts
        .iter()
        .filter_map(|(action, value)| {
            table
                .get(action)
                .map(|points| u64::from(*points) * value.weight())
        })
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}

#[must_use]
pub fn compute_alliance_total(scores: &PhaseScores) -> u32 {
    scores
        .auto
        .saturating_add(scores.teleop)
        .saturating_add(scores.endgame)
}

#[must_use]
pub fn compute_phase_scores(
    ruleset: &Ruleset,
    auto: &ActionCounts,
    teleop: &ActionCounts,
    endgame: &ActionCounts,
) -> PhaseScores {
    PhaseScores {
        auto: compute_points(ruleset, Phase::Auto, auto),
        teleop: compute_points(ruleset, Phase::Teleop, teleop),
        endgame: compute_points(ruleset, Phase::Endgame, endgame),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reefscape_sample_alliance() {
        let rules = builtin::reefscape_2025();
        let auto = ActionCounts::new()
            .with("leave", true)
            .with("coralL4", 1)
            .with("net", 1);
        let teleop = ActionCounts::new().with("coralL2", 4).with("processor", 2);
        let endgame = ActionCounts::new()
            .with("deepCage", true)
            .with("bargePark", false);

        let scores = compute_phase_scores(&rules, &auto, &teleop, &endgame);
        assert_eq!(scores.auto, 3 + 7 + 4);
        assert_eq!(scores.teleop, 12 + 12);
        assert_eq!(scores.endgame, 12);
        assert_eq!(scores.total(), 50);
    }

    #[test]
    fn test_unknown_actions_ignored() {
        let rules = builtin::crescendo_2024();
        let auto = ActionCounts::new()
            .with("autoSpeaker", 2)
            .with("futureAction", 9);
        assert_eq!(compute_points(&rules, Phase::Auto, &auto), 8);
    }

    #[test]
    fn test_same_action_scores_per_phase() {
        let rules = builtin::reefscape_2025();
        let counts = ActionCounts::new().with("coralL1", 1);
        assert_eq!(compute_points(&rules, Phase::Auto, &counts), 3);
        assert_eq!(compute_points(&rules, Phase::Teleop, &counts), 2);
        assert_eq!(compute_points(&rules, Phase::Endgame, &counts), 0);
    }

    #[test]
    fn test_ruleset_from_toml() {
        let rules = Ruleset::from_toml_str(
            r#"
            name = "practice-field"
            season = 2026

            [auto]
            taxi = 2

            [endgame]
            hang = 10
            "#,
        )
        .unwrap();

        assert_eq!(rules.points_for(Phase::Auto, "taxi"), Some(2));
        assert!(rules.teleop.is_empty());
        let endgame = ActionCounts::new().with("hang", true);
        assert_eq!(compute_points(&rules, Phase::Endgame, &endgame), 10);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = Ruleset::resolve("no-such-season").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(Ruleset::resolve("crescendo-2024").unwrap().season, 2024);
    }

    fn reference_reefscape_total(
        leave: bool,
        auto: [i64; 6],
        teleop: [i64; 6],
        endgame: [bool; 3],
    ) -> i64 {
        let mut total = 0;
        if leave {
            total += 3;
        }
        total += auto[0] * 3 + auto[1] * 4 + auto[2] * 6 + auto[3] * 7 + auto[4] * 6 + auto[5] * 4;
        total +=
            teleop[0] * 2 + teleop[1] * 3 + teleop[2] * 4 + teleop[3] * 5 + teleop[4] * 6 + teleop[5] * 4;
        if endgame[0] {
            total += 2;
        }
        if endgame[1] {
            total += 6;
        }
        if endgame[2] {
            total += 12;
        }
        total
    }

    const SCORING: [&str; 6] = ["coralL1", "coralL2", "coralL3", "coralL4", "processor", "net"];

    proptest! {
        /// Property: the engine matches the closed-form weighted sum for any
        /// non-negative counts.
        #[test]
        fn prop_reefscape_matches_reference(
            leave in any::<bool>(),
            auto in proptest::array::uniform6(0i64..50),
            teleop in proptest::array::uniform6(0i64..50),
            endgame in proptest::array::uniform3(any::<bool>()),
        ) {
            let rules = builtin::reefscape_2025();

            let mut auto_counts = ActionCounts::new().with("leave", leave);
            let mut teleop_counts = ActionCounts::new();
            for (i, action) in SCORING.iter().enumerate() {
                auto_counts.set(*action, auto[i]);
                teleop_counts.set(*action, teleop[i]);
            }
            let endgame_counts = ActionCounts::new()
                .with("bargePark", endgame[0])
                .with("shallowCage", endgame[1])
                .with("deepCage", endgame[2]);

            let scores = compute_phase_scores(&rules, &auto_counts, &teleop_counts, &endgame_counts);
            let expected = reference_reefscape_total(leave, auto, teleop, endgame);
            prop_assert_eq!(i64::from(scores.total()), expected);
        }
    }
}
