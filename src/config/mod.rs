mod scout;
pub mod settings;

pub use scout::{CONFIG_FILE, DB_FILE, DEFAULT_CAPACITY_BYTES, ScoutConfig};
pub use settings::{AppSettings, ApiCredentials, SettingsStore};
