use std::fs;
use std::path::Path;

use anyhow::Context;

use super::pickers::TeamDisplay;
use super::{init_store, print_json};
use crate::teams::TeamRegistry;

pub fn run_team_import(data_dir: &Path, file: &Path) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let payload: serde_json::Value =
        serde_json::from_str(&content).context("Import file is not valid JSON")?;

    let teams = TeamRegistry::new(ws.store).import_payload(&payload)?;

    println!("Successfully imported {} teams", teams.len());
    for team in teams.iter().take(10) {
        println!("  {}", TeamDisplay(team));
    }
    if teams.len() > 10 {
        println!("  ... and {} more teams", teams.len() - 10);
    }

    Ok(())
}

pub fn run_team_list(data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let teams = TeamRegistry::new(ws.store).list()?;

    if json {
        return print_json(&teams);
    }
    if teams.is_empty() {
        println!("No teams. Import some with 'scoutbook team import'.");
        return Ok(());
    }
    for team in &teams {
        println!("{}", TeamDisplay(team));
    }
    Ok(())
}

pub fn run_team_show(data_dir: &Path, team_number: u32, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let team = TeamRegistry::new(ws.store).get(team_number)?;

    if json {
        return print_json(&team);
    }

    println!("{}", TeamDisplay(&team));
    if !team.name.is_empty() {
        println!("  Name:     {}", team.name);
    }
    let location: Vec<&str> = [&team.city, &team.state_prov, &team.country]
        .into_iter()
        .map(String::as_str)
        .filter(|part| !part.is_empty())
        .collect();
    if !location.is_empty() {
        println!("  Location: {}", location.join(", "));
    }
    if let Some(year) = team.rookie_year {
        println!("  Rookie:   {year}");
    }
    if !team.school_name.is_empty() {
        println!("  School:   {}", team.school_name);
    }
    if !team.robot_name.is_empty() {
        println!("  Robot:    {}", team.robot_name);
    }
    if !team.website.is_empty() {
        println!("  Website:  {}", team.website);
    }
    Ok(())
}

pub fn run_team_search(data_dir: &Path, query: &str, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let teams = TeamRegistry::new(ws.store).search(query)?;

    if json {
        return print_json(&teams);
    }
    if teams.is_empty() {
        println!("No teams match '{query}'");
    }
    for team in &teams {
        println!("{}", TeamDisplay(team));
    }
    Ok(())
}
