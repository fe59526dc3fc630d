use std::fs;
use std::path::Path;

use anyhow::Context;

use super::pickers::confirm_action;
use super::{init_store, print_json};
use crate::backup::{self, format_bytes};

pub fn run_data_export(data_dir: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let dump = backup::export_dump(ws.store.as_ref())?;

    match output {
        Some(path) => {
            fs::write(path, serde_json::to_string_pretty(&dump)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported to {}", path.display());
        }
        None => print_json(&dump)?,
    }
    Ok(())
}

pub fn run_data_import(
    data_dir: &Path,
    file: &Path,
    yes: bool,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let dump: serde_json::Value =
        serde_json::from_str(&content).context("Error importing data: invalid format")?;

    let message = "Importing overwrites every key in the file. Continue?";
    if !confirm_action(message, yes, non_interactive)? {
        println!("Cancelled");
        return Ok(());
    }

    let count = backup::import_dump(ws.store.as_ref(), &dump)?;
    println!("Imported {count} keys");
    Ok(())
}

pub fn run_data_inventory(data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;
    let entries = backup::inventory(ws.store.as_ref())?;

    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No cached data");
        return Ok(());
    }

    let total: u64 = entries.iter().map(|e| e.bytes).sum();
    for entry in &entries {
        println!("{:<28} {:>12}", entry.key, entry.size);
    }
    println!(
        "{:<28} {:>12}  of {}",
        "total",
        format_bytes(total),
        format_bytes(ws.config.capacity_bytes)
    );
    Ok(())
}

pub fn run_data_delete(
    data_dir: &Path,
    key: &str,
    yes: bool,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;

    if !confirm_action(&format!("Delete '{key}'?"), yes, non_interactive)? {
        println!("Cancelled");
        return Ok(());
    }

    backup::delete_key(ws.store.as_ref(), key)?;
    println!("Deleted {key}");
    Ok(())
}

pub fn run_data_clear(data_dir: &Path, yes: bool, non_interactive: bool) -> anyhow::Result<()> {
    let ws = init_store(data_dir)?;

    let message = "Are you sure you want to clear all cached data? This action cannot be undone.";
    if !confirm_action(message, yes, non_interactive)? {
        println!("Cancelled");
        return Ok(());
    }

    let removed = backup::clear_all(ws.store.as_ref())?;
    println!("All cached data has been cleared ({removed} keys)");
    Ok(())
}
