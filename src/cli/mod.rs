mod commands;
mod data;
mod heatmap;
mod init;
mod note;
pub mod parse;
pub mod pickers;
mod schedule;
mod scout;
mod settings;
mod stats;
mod strategy;
mod team;

pub use commands::{
    DataCommands, HeatmapCommands, MatchCommands, NoteCommands, ScoutCommands, SettingsCommands,
    StatsCommands, StrategyCommands, TeamCommands,
};
pub use data::{run_data_clear, run_data_delete, run_data_export, run_data_import, run_data_inventory};
pub use heatmap::{run_heatmap_clear, run_heatmap_record, run_heatmap_show};
pub use init::run_init;
pub use note::{
    run_note_add, run_note_delete, run_note_edit, run_note_list, run_note_match, run_note_review,
};
pub use schedule::{
    run_match_add, run_match_list, run_match_remove, run_match_result, run_match_score,
    run_match_status,
};
pub use scout::{ScoutInput, run_scout_add, run_scout_list};
pub use settings::{run_settings_set, run_settings_show};
pub use stats::{run_stats_dashboard, run_stats_team};
pub use strategy::{
    StrategyEdit, run_strategy_compare, run_strategy_edit, run_strategy_set, run_strategy_show,
};
pub use team::{run_team_import, run_team_list, run_team_search, run_team_show};

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::config::ScoutConfig;
use crate::store::{SqliteStore, Store};

/// An opened data directory: its config and its store.
pub struct Workspace {
    pub config: ScoutConfig,
    pub store: Arc<dyn Store>,
}

/// Open the store in a data directory, checking it was initialized
pub fn init_store(data_dir: &Path) -> anyhow::Result<Workspace> {
    let config = ScoutConfig::load(data_dir)?;
    let db_path = config.db_path();

    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'scoutbook init' first.",
            db_path.display()
        );
    }

    let store = SqliteStore::new(&db_path)?.with_capacity(config.capacity_bytes);
    Ok(Workspace {
        config,
        store: Arc::new(store),
    })
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
