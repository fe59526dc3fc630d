use std::path::Path;

use super::parse::parse_actions;
use super::{init_store, print_json};
use crate::scouting::{ScoutingEntry, ScoutingLog};

pub struct ScoutInput<'a> {
    pub team: u32,
    pub match_number: u32,
    pub auto: &'a [String],
    pub teleop: &'a [String],
    pub endgame: &'a [String],
    pub notes: String,
}

pub fn run_scout_add(data_dir: &Path, input: ScoutInput<'_>) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let rules = ws.config.scouting_rules()?;

    let mut entry = ScoutingEntry::new(input.team, input.match_number);
    entry.auto = parse_actions(input.auto)?;
    entry.teleop = parse_actions(input.teleop)?;
    entry.endgame = parse_actions(input.endgame)?;
    entry.notes = input.notes;

    let entry = ScoutingLog::new(ws.store).append(entry)?;
    let scores = entry.scores(&rules);

    println!(
        "Recorded team {} in match {}: {} points (auto {}, teleop {}, endgame {})",
        entry.team_number,
        entry.match_number,
        scores.total(),
        scores.auto,
        scores.teleop,
        scores.endgame
    );
    Ok(())
}

pub fn run_scout_list(data_dir: &Path, team: Option<u32>, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let rules = ws.config.scouting_rules()?;
    let log = ScoutingLog::new(ws.store);
    let entries = match team {
        Some(team) => log.for_team(team)?,
        None => log.list()?,
    };

    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No scouting entries");
    }
    for entry in &entries {
        let scores = entry.scores(&rules);
        println!(
            "team {:<6} match {:<4} {:>4} pts  (auto {}, teleop {}, endgame {})",
            entry.team_number,
            entry.match_number,
            scores.total(),
            scores.auto,
            scores.teleop,
            scores.endgame
        );
    }
    Ok(())
}
