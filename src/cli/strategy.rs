use std::path::Path;
use std::sync::Arc;

use super::{init_store, print_json};
use crate::store::Store;
use crate::strategy::{ListName, StrategyBook, StrategyProfile};

fn book(store: Arc<dyn Store>, per_team: bool) -> StrategyBook {
    if per_team {
        StrategyBook::team_strategy(store)
    } else {
        StrategyBook::planning(store)
    }
}

/// A change to one profile.
pub enum StrategyEdit {
    Add { list: String, text: String },
    Edit { list: String, index: usize, text: String },
    Remove { list: String, index: usize },
    Notes { text: String },
}

fn print_profile(team: u32, profile: &StrategyProfile) {
    println!("Team {team}");
    for (axis, value) in &profile.capabilities {
        println!("  {axis:<16} {value}");
    }
    for list in ListName::ALL {
        let items = profile.list(list);
        if items.is_empty() {
            continue;
        }
        println!("  {list}:");
        for (i, item) in items.iter().enumerate() {
            println!("    [{i}] {item}");
        }
    }
    if !profile.notes.is_empty() {
        println!("  notes: {}", profile.notes);
    }
    if let Some(updated) = profile.last_updated {
        println!("  updated {}", updated.format("%Y-%m-%d %H:%M"));
    }
}

pub fn run_strategy_show(data_dir: &Path, team: u32, per_team: bool, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let profile = book(ws.store, per_team).load(team)?;

    if json {
        return print_json(&profile);
    }
    print_profile(team, &profile);
    Ok(())
}

pub fn run_strategy_set(
    data_dir: &Path,
    team: u32,
    axis: &str,
    value: i32,
    per_team: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let stored = book(ws.store, per_team).set_capability(team, axis, value)?;

    if stored != value {
        println!("Team {team} {axis} = {stored} (clamped from {value})");
    } else {
        println!("Team {team} {axis} = {stored}");
    }
    Ok(())
}

pub fn run_strategy_edit(
    data_dir: &Path,
    team: u32,
    per_team: bool,
    edit: StrategyEdit,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let profiles = book(ws.store, per_team);

    match edit {
        StrategyEdit::Add { list, text } => {
            let list: ListName = list.parse()?;
            let profile = profiles.add_list_item(team, list, &text)?;
            println!("Added to {list} ({} items)", profile.list(list).len());
        }
        StrategyEdit::Edit { list, index, text } => {
            let list: ListName = list.parse()?;
            profiles.edit_list_item(team, list, index, &text)?;
            println!("Updated {list} item {index}");
        }
        StrategyEdit::Remove { list, index } => {
            let list: ListName = list.parse()?;
            let removed = profiles.remove_list_item(team, list, index)?;
            println!("Removed from {list}: {removed}");
        }
        StrategyEdit::Notes { text } => {
            let mut profile = profiles.load_or_blank(team)?;
            profile.notes = text;
            profiles.save(team, profile)?;
            println!("Saved notes for team {team}");
        }
    }
    Ok(())
}

pub fn run_strategy_compare(
    data_dir: &Path,
    team_a: u32,
    team_b: u32,
    per_team: bool,
    json: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let comparison = book(ws.store, per_team).compare(team_a, team_b)?;

    if json {
        return print_json(&comparison);
    }

    println!("{:<16} {:>6} {:>6}", "", team_a, team_b);
    for row in &comparison {
        println!("{:<16} {:>6} {:>6}", row.axis, row.team_a, row.team_b);
    }
    Ok(())
}
