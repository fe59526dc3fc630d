//! User preferences persisted in the store under `app_settings`.

use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::keys::APP_SETTINGS;
use crate::store::{Store, StoreExt};

pub const RETENTION_DAYS: RangeInclusive<u32> = 1..=365;
pub const SEASON_YEARS: RangeInclusive<i32> = 1992..=2100;
const DEFAULT_RETENTION_DAYS: u32 = 30;

fn default_retention() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn current_year() -> i32 {
    Utc::now().year()
}

/// Event API login. Stored as-is; never logged.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub api_key: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub offline_mode: bool,
    #[serde(default = "default_retention", alias = "dataRetention")]
    pub data_retention_days: u32,
    #[serde(default = "current_year")]
    pub year: i32,
    #[serde(default)]
    pub event_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<ApiCredentials>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            offline_mode: false,
            data_retention_days: DEFAULT_RETENTION_DAYS,
            year: current_year(),
            event_code: String::new(),
            credentials: None,
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<()> {
        if !RETENTION_DAYS.contains(&self.data_retention_days) {
            return Err(Error::Validation(format!(
                "dataRetentionDays must be between {} and {}",
                RETENTION_DAYS.start(),
                RETENTION_DAYS.end()
            )));
        }
        if !SEASON_YEARS.contains(&self.year) {
            return Err(Error::Validation(format!(
                "year must be between {} and {}",
                SEASON_YEARS.start(),
                SEASON_YEARS.end()
            )));
        }
        Ok(())
    }

    /// Sets one field from its textual form. Names match case-insensitively
    /// and ignore `-` and `_`, so `event-code` and `eventCode` name the same
    /// field.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let value = value.trim();

        match normalized.as_str() {
            "offlinemode" => {
                self.offline_mode = parse_bool(value)?;
            }
            "dataretentiondays" | "dataretention" => {
                self.data_retention_days = value
                    .parse()
                    .map_err(|_| Error::Validation(format!("invalid number of days '{value}'")))?;
            }
            "year" => {
                self.year = value
                    .parse()
                    .map_err(|_| Error::Validation(format!("invalid year '{value}'")))?;
            }
            "eventcode" => self.event_code = value.to_string(),
            "username" => {
                self.credentials.get_or_insert_with(ApiCredentials::default).username =
                    value.to_string();
            }
            "apikey" => {
                self.credentials.get_or_insert_with(ApiCredentials::default).api_key =
                    value.to_string();
            }
            _ => return Err(Error::Validation(format!("unknown setting '{name}'"))),
        }

        self.validate()
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::Validation(format!("expected true or false, got '{value}'"))),
    }
}

pub struct SettingsStore {
    store: Arc<dyn Store>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<AppSettings> {
        Ok(self.store.load(APP_SETTINGS)?.unwrap_or_default())
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        settings.validate()?;
        self.store.save(APP_SETTINGS, settings)?;
        info!(event = %settings.event_code, year = settings.year, "settings saved");
        Ok(())
    }

    pub fn set_field(&self, name: &str, value: &str) -> Result<AppSettings> {
        let mut settings = self.load()?;
        settings.set_field(name, value)?;
        self.save(&settings)?;
        Ok(settings)
    }
}
