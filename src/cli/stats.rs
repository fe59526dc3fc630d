use std::path::Path;

use super::pickers::{MatchDisplay, TeamDisplay};
use super::{init_store, print_json};
use crate::analytics::{aggregate, dashboard_summary};
use crate::matches::MatchRecordStore;
use crate::scouting::ScoutingLog;
use crate::teams::TeamRegistry;

pub fn run_stats_team(data_dir: &Path, team_number: u32, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let rules = ws.config.scouting_rules()?;
    let entries = ScoutingLog::new(ws.store.clone()).list()?;
    let matches = MatchRecordStore::new(ws.store).list()?;

    let perf = aggregate(&rules, &entries, &matches, team_number);

    if json {
        return print_json(&perf);
    }

    println!("Team {team_number} ({} rules)", rules.name);
    println!("  Auto avg:       {:.1}", perf.auto_avg);
    println!("  Teleop avg:     {:.1}", perf.teleop_avg);
    println!("  Endgame avg:    {:.1}", perf.endgame_avg);
    println!("  Total avg:      {:.1}", perf.total_avg);
    println!("  Matches played: {}", perf.matches_played);
    println!("  Win rate:       {}% ({} wins)", perf.win_rate, perf.wins);
    if !perf.per_match.is_empty() {
        println!();
        for p in &perf.per_match {
            println!(
                "  Match {:<4} {:>4} pts  (auto {}, teleop {}, endgame {})",
                p.match_number, p.total, p.auto, p.teleop, p.endgame
            );
        }
    }
    Ok(())
}

pub fn run_stats_dashboard(data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let rules = ws.config.scouting_rules()?;
    let entries = ScoutingLog::new(ws.store.clone()).list()?;
    let matches = MatchRecordStore::new(ws.store.clone()).list()?;
    let teams = TeamRegistry::new(ws.store).list()?;

    let summary = dashboard_summary(&rules, &entries, &matches, &teams);

    if json {
        return print_json(&summary);
    }

    println!("Teams scouted:     {}", summary.teams_scouted);
    println!("Matches scouted:   {}", summary.matches_scouted);
    println!("Completed matches: {}", summary.completed_matches);
    match &summary.top_performer {
        Some(team) => println!("Top performer:     {}", TeamDisplay(team)),
        None => println!("Top performer:     none yet"),
    }
    if !summary.upcoming.is_empty() {
        println!();
        println!("Matches:");
        for m in &summary.upcoming {
            println!("  {}", MatchDisplay(m));
        }
    }
    Ok(())
}
