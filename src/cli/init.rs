use std::fs;
use std::path::Path;

use anyhow::bail;

use crate::config::ScoutConfig;
use crate::store::SqliteStore;

pub fn run_init(
    data_dir: &Path,
    capacity_bytes: Option<u64>,
    scouting_ruleset: Option<String>,
    match_ruleset: Option<String>,
) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)?;

    let mut config = ScoutConfig::load(data_dir)?;
    if config.db_path().exists() {
        bail!(
            "Already initialized. Database exists at: {}",
            config.db_path().display()
        );
    }

    if let Some(capacity) = capacity_bytes {
        config.capacity_bytes = capacity;
    }
    if let Some(name) = scouting_ruleset {
        config.scouting_ruleset = name;
    }
    if let Some(name) = match_ruleset {
        config.match_ruleset = name;
    }
    config.validate()?;
    // Fail before creating anything if a ruleset does not resolve.
    let scouting = config.scouting_rules()?;
    let quick = config.match_rules()?;

    config.save()?;
    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    println!();
    println!("Initialized scoutbook in {}", data_dir.display());
    println!("  Scouting ruleset: {} ({})", scouting.name, scouting.season);
    println!("  Match ruleset:    {} ({})", quick.name, quick.season);
    println!("  Capacity:         {}", crate::backup::format_bytes(config.capacity_bytes));
    println!();

    Ok(())
}
