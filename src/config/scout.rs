use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::rules::Ruleset;
use crate::rules::builtin::{CRESCENDO_2024, REEFSCAPE_2025};

pub const DB_FILE: &str = "scoutbook.db";
pub const CONFIG_FILE: &str = "scoutbook.toml";
pub const DEFAULT_CAPACITY_BYTES: u64 = 5 * 1024 * 1024;

/// Local installation settings, read from `scoutbook.toml` in the data
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Upper bound on stored bytes, mirroring a browser storage quota.
    pub capacity_bytes: u64,
    /// Ruleset for per-robot scouting entries: a built-in name or a TOML path.
    pub scouting_ruleset: String,
    /// Ruleset for alliance quick scores.
    pub match_ruleset: String,
}

impl ScoutConfig {
    /// Reads the config file under `data_dir`; a missing file means defaults.
    pub fn load(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let path = data_dir.join(CONFIG_FILE);

        let mut config = if path.is_file() {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<ScoutConfig>(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            ScoutConfig::default()
        };
        config.data_dir = data_dir;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::Config(format!("serialize: {e}")))?;
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.config_path(), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity_bytes == 0 {
            return Err(Error::Config("capacity_bytes must be positive".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    pub fn scouting_rules(&self) -> Result<Ruleset> {
        self.resolve_ruleset(&self.scouting_ruleset)
    }

    pub fn match_rules(&self) -> Result<Ruleset> {
        self.resolve_ruleset(&self.match_ruleset)
    }

    /// Relative ruleset paths are taken from the data directory.
    fn resolve_ruleset(&self, name: &str) -> Result<Ruleset> {
        if let Some(ruleset) = Ruleset::builtin(name) {
            return Ok(ruleset);
        }
        let path = Path::new(name);
        if path.is_relative() {
            let local = self.data_dir.join(path);
            if local.is_file() {
                return Ruleset::resolve(&local.to_string_lossy());
            }
        }
        Ruleset::resolve(name)
    }
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            scouting_ruleset: CRESCENDO_2024.to_string(),
            match_ruleset: REEFSCAPE_2025.to_string(),
        }
    }
}
