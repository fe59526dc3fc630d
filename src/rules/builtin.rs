use std::collections::BTreeMap;

use super::Ruleset;

pub const REEFSCAPE_2025: &str = "reefscape-2025";
pub const CRESCENDO_2024: &str = "crescendo-2024";

pub const NAMES: [&str; 2] = [REEFSCAPE_2025, CRESCENDO_2024];

fn table(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries
        .iter()
        .map(|(action, points)| ((*action).to_string(), *points))
        .collect()
}

/// Alliance-level quick scoring table.
pub fn reefscape_2025() -> Ruleset {
    Ruleset {
        name: REEFSCAPE_2025.to_string(),
        season: 2025,
        auto: table(&[
            ("leave", 3),
            ("coralL1", 3),
            ("coralL2", 4),
            ("coralL3", 6),
            ("coralL4", 7),
            ("processor", 6),
            ("net", 4),
        ]),
        teleop: table(&[
            ("coralL1", 2),
            ("coralL2", 3),
            ("coralL3", 4),
            ("coralL4", 5),
            ("processor", 6),
            ("net", 4),
        ]),
        endgame: table(&[("bargePark", 2), ("shallowCage", 6), ("deepCage", 12)]),
    }
}

/// Per-robot scouting table.
pub fn crescendo_2024() -> Ruleset {
    Ruleset {
        name: CRESCENDO_2024.to_string(),
        season: 2024,
        auto: table(&[("autoSpeaker", 4), ("autoAmp", 2), ("mobility", 2)]),
        teleop: table(&[("teleopSpeaker", 2), ("teleopAmp", 1), ("teleopTrap", 5)]),
        endgame: table(&[("climb", 3), ("harmony", 2), ("spotlight", 1), ("park", 1)]),
    }
}
