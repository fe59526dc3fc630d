use std::path::Path;

use super::{init_store, print_json};
use crate::config::{AppSettings, SettingsStore};

fn redacted(mut settings: AppSettings) -> AppSettings {
    if let Some(creds) = settings.credentials.as_mut() {
        if !creds.api_key.is_empty() {
            creds.api_key = "********".to_string();
        }
    }
    settings
}

pub fn run_settings_show(data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let settings = redacted(SettingsStore::new(ws.store).load()?);

    if json {
        return print_json(&settings);
    }

    println!("offlineMode:       {}", settings.offline_mode);
    println!("dataRetentionDays: {}", settings.data_retention_days);
    println!("year:              {}", settings.year);
    println!("eventCode:         {}", settings.event_code);
    if let Some(creds) = &settings.credentials {
        println!("username:          {}", creds.username);
        println!("apiKey:            {}", creds.api_key);
    }
    println!();
    println!("scoutingRuleset:   {}", ws.config.scouting_ruleset);
    println!("matchRuleset:      {}", ws.config.match_ruleset);
    Ok(())
}

pub fn run_settings_set(data_dir: &Path, name: &str, value: &str) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    SettingsStore::new(ws.store).set_field(name, value)?;

    println!("Updated {name}");
    Ok(())
}
