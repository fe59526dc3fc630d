use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::parse::parse_performance;
use super::pickers::confirm_action;
use super::{init_store, print_json};
use crate::notes::{AnalysisEntry, Note, NoteBook};

pub fn run_note_add(
    data_dir: &Path,
    team: u32,
    text: &str,
    match_number: Option<u32>,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let notes = NoteBook::new(ws.store);

    match match_number {
        Some(match_number) => {
            let entry = notes.add_analysis(team, match_number, text)?;
            println!("Added analysis {} for team {team}, match {match_number}", entry.id);
        }
        None => {
            let note = notes.add_note(team, text)?;
            println!("Added note {} for team {team}", note.id);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct TeamNotesOutput {
    notes: Vec<Note>,
    analyses: Vec<AnalysisEntry>,
}

pub fn run_note_list(data_dir: &Path, team: u32, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let book = NoteBook::new(ws.store);
    let output = TeamNotesOutput {
        notes: book.notes(team)?,
        analyses: book.analyses(team)?,
    };

    if json {
        return print_json(&output);
    }
    if output.notes.is_empty() && output.analyses.is_empty() {
        println!("No notes for team {team}");
        return Ok(());
    }
    for note in &output.notes {
        println!(
            "{}  {}  {}",
            note.id,
            note.timestamp.format("%Y-%m-%d %H:%M"),
            note.text
        );
    }
    for entry in &output.analyses {
        println!(
            "{}  match {:<4} {}",
            entry.id, entry.match_number, entry.text
        );
    }
    Ok(())
}

pub fn run_note_edit(data_dir: &Path, team: u32, id: &str, text: &str) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let note = NoteBook::new(ws.store).edit_note(team, id, text)?;

    println!("Updated note {}", note.id);
    Ok(())
}

pub fn run_note_delete(
    data_dir: &Path,
    team: u32,
    id: &str,
    analysis: bool,
    yes: bool,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let notes = NoteBook::new(ws.store);

    let kind = if analysis { "analysis" } else { "note" };
    if !confirm_action(&format!("Delete {kind} {id}?"), yes, non_interactive)? {
        println!("Cancelled");
        return Ok(());
    }

    if analysis {
        notes.delete_analysis(team, id)?;
    } else {
        notes.delete_note(team, id)?;
    }
    println!("Deleted {kind} {id}");
    Ok(())
}

pub fn run_note_review(
    data_dir: &Path,
    match_number: u32,
    text: &str,
    teams: &[String],
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;

    let mut performance = BTreeMap::new();
    for arg in teams {
        let (team, perf) = parse_performance(arg)?;
        performance.insert(team, perf);
    }

    let analysis = NoteBook::new(ws.store).save_match_analysis(match_number, text, performance)?;
    println!(
        "Saved analysis for match {} ({} teams)",
        analysis.match_number,
        analysis.team_performance.len()
    );
    Ok(())
}

pub fn run_note_match(data_dir: &Path, match_number: u32, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let Some(analysis) = NoteBook::new(ws.store).match_analysis(match_number)? else {
        anyhow::bail!("No analysis for match {match_number}");
    };

    if json {
        return print_json(&analysis);
    }

    println!("Match {match_number}");
    if !analysis.notes.is_empty() {
        println!("  {}", analysis.notes);
    }
    for (team, perf) in &analysis.team_performance {
        println!(
            "  team {team:<6} {:>4} pts  (auto {}, teleop {}, endgame {})  defense {}/5",
            perf.total_points(),
            perf.auto_points,
            perf.teleop_points,
            perf.endgame_points,
            perf.defense_rating
        );
    }
    Ok(())
}
