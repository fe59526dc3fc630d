use std::path::Path;
use std::sync::Arc;

use super::parse::parse_point;
use super::pickers::confirm_action;
use super::{init_store, print_json};
use crate::heatmap::HeatmapModel;
use crate::store::Store;
use crate::store::keys::{HEATMAPS, TEAM_HEATMAPS};
use crate::types::Phase;

fn model(store: Arc<dyn Store>, strategy: bool) -> HeatmapModel {
    let key = if strategy { TEAM_HEATMAPS } else { HEATMAPS };
    HeatmapModel::with_key(store, key)
}

pub fn run_heatmap_record(
    data_dir: &Path,
    team: u32,
    phase: &str,
    points: &[String],
    strategy: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let phase: Phase = phase.parse()?;
    let heatmaps = model(ws.store, strategy);

    let parsed = points
        .iter()
        .map(|p| parse_point(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut session = heatmaps.begin_session(team, phase)?;
    for point in parsed {
        session.append_point(point.x, point.y);
    }
    let stored = heatmaps.save_session(session)?;

    println!("Team {team} {phase}: {stored} points stored");
    Ok(())
}

pub fn run_heatmap_show(
    data_dir: &Path,
    team: u32,
    phase: Option<&str>,
    strategy: bool,
    json: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let heatmaps = model(ws.store, strategy);

    let mut all = heatmaps.team_heatmaps(team)?;
    if let Some(phase) = phase {
        let phase: Phase = phase.parse()?;
        all.retain(|p, _| *p == phase);
    }

    if json {
        return print_json(&all);
    }
    if all.is_empty() {
        println!("No heatmap points for team {team}");
        return Ok(());
    }
    for (phase, points) in &all {
        println!("{phase}: {} points", points.len());
        for point in points {
            println!("  ({:.1}, {:.1})", point.x, point.y);
        }
    }
    Ok(())
}

pub fn run_heatmap_clear(
    data_dir: &Path,
    team: u32,
    phase: &str,
    strategy: bool,
    yes: bool,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let phase: Phase = phase.parse()?;
    let heatmaps = model(ws.store, strategy);

    let message = format!("Clear the {phase} heatmap for team {team}?");
    if !confirm_action(&message, yes, non_interactive)? {
        println!("Cancelled");
        return Ok(());
    }

    if heatmaps.clear(team, phase)? {
        println!("Cleared {phase} heatmap for team {team}");
    } else {
        println!("No {phase} heatmap stored for team {team}");
    }
    Ok(())
}
