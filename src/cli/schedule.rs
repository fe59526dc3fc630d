use std::path::Path;

use anyhow::bail;
use serde::Serialize;

use super::parse::parse_quick_score;
use super::pickers::{MatchDisplay, confirm_action};
use super::{init_store, print_json};
use crate::matches::{MatchRecordStore, QuickScorePair, ScheduleState};
use crate::types::{ALLIANCE_SIZE, CompLevel, Match};

fn alliance(color: &str, teams: &[u32]) -> anyhow::Result<[u32; ALLIANCE_SIZE]> {
    match <[u32; ALLIANCE_SIZE]>::try_from(teams) {
        Ok(teams) => Ok(teams),
        Err(_) => bail!(
            "--{color} needs exactly {ALLIANCE_SIZE} team numbers, got {}",
            teams.len()
        ),
    }
}

pub fn run_match_add(
    data_dir: &Path,
    number: u32,
    red: &[u32],
    blue: &[u32],
    level: &str,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let level: CompLevel = level.parse()?;
    let record = Match::scheduled(number, level, alliance("red", red)?, alliance("blue", blue)?);

    let added = MatchRecordStore::new(ws.store).add(record)?;

    println!("Added {}", MatchDisplay(&added));
    Ok(())
}

pub fn run_match_list(data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let matches = MatchRecordStore::new(ws.store).list()?;

    if json {
        return print_json(&matches);
    }
    if matches.is_empty() {
        println!("No matches");
    }
    for m in &matches {
        println!("{}", MatchDisplay(m));
    }
    Ok(())
}

pub fn run_match_remove(
    data_dir: &Path,
    number: u32,
    yes: bool,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let matches = MatchRecordStore::new(ws.store);
    let record = matches.get(number)?;

    let message = format!(
        "Remove match {number} with its quick scores and analysis? This cannot be undone."
    );
    if !confirm_action(&message, yes, non_interactive)? {
        println!("Cancelled");
        return Ok(());
    }

    matches.remove(record.match_number)?;
    println!("Removed match {number}");
    Ok(())
}

pub fn run_match_result(data_dir: &Path, number: u32, red: u32, blue: u32) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let record = MatchRecordStore::new(ws.store).record_result(number, red, blue)?;

    println!("{}", MatchDisplay(&record));
    Ok(())
}

#[derive(Serialize)]
struct ScoreOutput {
    #[serde(rename = "match")]
    record: Match,
    scores: QuickScorePair,
}

pub fn run_match_score(
    data_dir: &Path,
    number: u32,
    red: &[String],
    blue: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let rules = ws.config.match_rules()?;
    let red = parse_quick_score(&rules, red)?;
    let blue = parse_quick_score(&rules, blue)?;

    let matches = MatchRecordStore::new(ws.store);
    let record = matches.save_quick_scores(number, red, blue, &rules)?;
    let scores = matches.quick_scores(number)?.unwrap_or_default();

    if json {
        return print_json(&ScoreOutput { record, scores });
    }

    println!("Scored with {} rules", rules.name);
    println!("  Red:  {}", scores.red.total);
    println!("  Blue: {}", scores.blue.total);
    println!("{}", MatchDisplay(&record));
    Ok(())
}

pub fn run_match_status(data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let status = MatchRecordStore::new(ws.store).status()?;

    if json {
        return print_json(&status);
    }

    match status.status {
        ScheduleState::Unknown => println!("No matches scheduled"),
        ScheduleState::Completed => println!("All matches completed"),
        ScheduleState::Scheduled => {
            if let Some(current) = status.current_match {
                println!("Current match: {current}");
            }
            match status.next_match {
                Some(next) => println!("Next match:    {next}"),
                None => println!("Next match:    none"),
            }
        }
    }
    Ok(())
}
