//! Capability ratings and observation lists used to compare teams.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::store::keys::{TEAM_STRATEGIES, strategy_key};
use crate::store::{Store, StoreExt};

/// A named rating with an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityAxis {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl CapabilityAxis {
    const fn new(name: &'static str, min: i32, max: i32, default: i32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSet {
    axes: Vec<CapabilityAxis>,
}

impl AxisSet {
    /// Match-planning ratings, 0 to 10.
    pub fn planning() -> Self {
        Self {
            axes: ["shooting", "climbing", "defense", "speed", "control", "intake"]
                .into_iter()
                .map(|name| CapabilityAxis::new(name, 0, 10, 0))
                .collect(),
        }
    }

    /// Per-team scouting ratings, 1 to 5.
    pub fn team_strategy() -> Self {
        Self {
            axes: ["scoring", "defense", "speed", "maneuverability", "consistency"]
                .into_iter()
                .map(|name| CapabilityAxis::new(name, 1, 5, 3))
                .collect(),
        }
    }

    pub fn axes(&self) -> &[CapabilityAxis] {
        &self.axes
    }

    pub fn axis(&self, name: &str) -> Option<&CapabilityAxis> {
        self.axes.iter().find(|axis| axis.name == name)
    }

    fn require(&self, name: &str) -> Result<&CapabilityAxis> {
        self.axis(name).ok_or_else(|| {
            let known: Vec<&str> = self.axes.iter().map(|a| a.name).collect();
            Error::Validation(format!(
                "unknown capability '{name}' (expected one of: {})",
                known.join(", ")
            ))
        })
    }

    pub fn defaults(&self) -> BTreeMap<String, i32> {
        self.axes
            .iter()
            .map(|axis| (axis.name.to_string(), axis.default))
            .collect()
    }
}

/// Where profiles live in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileLayout {
    /// Every team in one `team_strategies` map.
    Shared,
    /// One `strategy_<team>` key per team.
    PerTeam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    Strengths,
    Weaknesses,
    #[serde(alias = "strategies")]
    Recommendations,
}

impl ListName {
    pub const ALL: [ListName; 3] = [
        ListName::Strengths,
        ListName::Weaknesses,
        ListName::Recommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strengths => "strengths",
            Self::Weaknesses => "weaknesses",
            Self::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strengths" | "strength" => Ok(Self::Strengths),
            "weaknesses" | "weakness" => Ok(Self::Weaknesses),
            "recommendations" | "recommendation" | "strategies" => Ok(Self::Recommendations),
            _ => Err(Error::Validation(format!("unknown list '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyProfile {
    #[serde(default)]
    pub capabilities: BTreeMap<String, i32>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, alias = "strategies")]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl StrategyProfile {
    pub fn list(&self, name: ListName) -> &[String] {
        match name {
            ListName::Strengths => &self.strengths,
            ListName::Weaknesses => &self.weaknesses,
            ListName::Recommendations => &self.recommendations,
        }
    }

    fn list_mut(&mut self, name: ListName) -> &mut Vec<String> {
        match name {
            ListName::Strengths => &mut self.strengths,
            ListName::Weaknesses => &mut self.weaknesses,
            ListName::Recommendations => &mut self.recommendations,
        }
    }
}

/// One axis of a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisComparison {
    pub axis: &'static str,
    pub team_a: i32,
    pub team_b: i32,
}

fn require_text(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::validation("text cannot be empty"));
    }
    Ok(text.to_string())
}

fn item_not_found(team_number: u32, list: ListName, index: usize) -> Error {
    Error::not_found(format!("{list} item {index} for team {team_number}"))
}

pub struct StrategyBook {
    store: Arc<dyn Store>,
    axes: AxisSet,
    layout: ProfileLayout,
}

impl StrategyBook {
    pub fn new(store: Arc<dyn Store>, axes: AxisSet, layout: ProfileLayout) -> Self {
        Self {
            store,
            axes,
            layout,
        }
    }

    /// 0-10 planning profiles in the shared map.
    pub fn planning(store: Arc<dyn Store>) -> Self {
        Self::new(store, AxisSet::planning(), ProfileLayout::Shared)
    }

    /// 1-5 team profiles, one key per team.
    pub fn team_strategy(store: Arc<dyn Store>) -> Self {
        Self::new(store, AxisSet::team_strategy(), ProfileLayout::PerTeam)
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    fn read(&self, team_number: u32) -> Result<Option<StrategyProfile>> {
        match self.layout {
            ProfileLayout::Shared => {
                let mut all: BTreeMap<u32, StrategyProfile> =
                    self.store.load_or_default(TEAM_STRATEGIES)?;
                Ok(all.remove(&team_number))
            }
            ProfileLayout::PerTeam => self.store.load(&strategy_key(team_number)),
        }
    }

    fn write(&self, team_number: u32, profile: &StrategyProfile) -> Result<()> {
        match self.layout {
            ProfileLayout::Shared => {
                let mut all: BTreeMap<u32, StrategyProfile> =
                    self.store.load_or_default(TEAM_STRATEGIES)?;
                all.insert(team_number, profile.clone());
                self.store.save(TEAM_STRATEGIES, &all)
            }
            ProfileLayout::PerTeam => self.store.save(&strategy_key(team_number), profile),
        }
    }

    /// A fresh profile with every axis at its default.
    pub fn blank(&self) -> StrategyProfile {
        StrategyProfile {
            capabilities: self.axes.defaults(),
            ..StrategyProfile::default()
        }
    }

    pub fn load(&self, team_number: u32) -> Result<StrategyProfile> {
        debug!(team = team_number, "loading strategy profile");
        self.read(team_number)?
            .ok_or_else(|| Error::not_found(format!("strategy profile for team {team_number}")))
    }

    pub fn load_or_blank(&self, team_number: u32) -> Result<StrategyProfile> {
        Ok(self.read(team_number)?.unwrap_or_else(|| self.blank()))
    }

    /// Stores `profile` as the team's whole profile and stamps it.
    pub fn save(&self, team_number: u32, mut profile: StrategyProfile) -> Result<StrategyProfile> {
        if team_number == 0 {
            return Err(Error::validation("no team selected"));
        }
        for (name, value) in &profile.capabilities {
            let axis = self.axes.require(name)?;
            if !(axis.min..=axis.max).contains(value) {
                return Err(Error::Validation(format!(
                    "{name} must be between {} and {}, got {value}",
                    axis.min, axis.max
                )));
            }
        }

        profile.last_updated = Some(Utc::now());
        self.write(team_number, &profile)?;

        info!(team = team_number, "strategy profile saved");
        Ok(profile)
    }

    pub fn add_list_item(
        &self,
        team_number: u32,
        list: ListName,
        text: &str,
    ) -> Result<StrategyProfile> {
        let text = require_text(text)?;
        let mut profile = self.load_or_blank(team_number)?;
        profile.list_mut(list).push(text);
        self.save(team_number, profile)
    }

    pub fn edit_list_item(
        &self,
        team_number: u32,
        list: ListName,
        index: usize,
        text: &str,
    ) -> Result<StrategyProfile> {
        let text = require_text(text)?;
        let mut profile = self.load_or_blank(team_number)?;
        let item = profile
            .list_mut(list)
            .get_mut(index)
            .ok_or_else(|| item_not_found(team_number, list, index))?;
        *item = text;
        self.save(team_number, profile)
    }

    /// Removes and returns the item at `index`.
    pub fn remove_list_item(&self, team_number: u32, list: ListName, index: usize) -> Result<String> {
        let mut profile = self.load_or_blank(team_number)?;
        let items = profile.list_mut(list);
        if index >= items.len() {
            return Err(item_not_found(team_number, list, index));
        }
        let removed = items.remove(index);
        self.save(team_number, profile)?;
        Ok(removed)
    }

    /// Sets one rating, clamped into the axis range. Returns the stored value.
    pub fn set_capability(&self, team_number: u32, axis: &str, value: i32) -> Result<i32> {
        let axis = *self.axes.require(axis)?;
        let value = axis.clamp(value);

        let mut profile = self.load_or_blank(team_number)?;
        profile.capabilities.insert(axis.name.to_string(), value);
        self.save(team_number, profile)?;
        Ok(value)
    }

    /// Pairs both teams' ratings on every declared axis. A team without a
    /// profile, or without a rating on some axis, reads as the axis floor.
    pub fn compare(&self, team_a: u32, team_b: u32) -> Result<Vec<AxisComparison>> {
        let a = self.read(team_a)?.unwrap_or_default();
        let b = self.read(team_b)?.unwrap_or_default();

        Ok(self
            .axes
            .axes()
            .iter()
            .map(|axis| {
                let value = |p: &StrategyProfile| {
                    p.capabilities
                        .get(axis.name)
                        .map_or(axis.min, |v| axis.clamp(*v))
                };
                AxisComparison {
                    axis: axis.name,
                    team_a: value(&a),
                    team_b: value(&b),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn setup(layout: ProfileLayout) -> (Arc<MemoryStore>, StrategyBook) {
        let store = Arc::new(MemoryStore::new());
        let axes = match layout {
            ProfileLayout::Shared => AxisSet::planning(),
            ProfileLayout::PerTeam => AxisSet::team_strategy(),
        };
        let book = StrategyBook::new(store.clone(), axes, layout);
        (store, book)
    }

    fn sample() -> StrategyProfile {
        StrategyProfile {
            capabilities: BTreeMap::from([("shooting".to_string(), 8), ("defense".to_string(), 4)]),
            strengths: vec!["fast cycles".to_string()],
            weaknesses: vec!["no climb".to_string(), "tips easily".to_string()],
            recommendations: vec!["pair with a climber".to_string()],
            notes: "watch match 14".to_string(),
            last_updated: None,
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_, book) = setup(ProfileLayout::Shared);
        let profile = sample();

        let saved = book.save(118, profile.clone()).unwrap();
        let mut loaded = book.load(118).unwrap();

        assert!(loaded.last_updated.is_some());
        assert_eq!(loaded, saved);
        loaded.last_updated = None;
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_save_replaces_whole_profile() {
        let (_, book) = setup(ProfileLayout::Shared);
        book.save(118, sample()).unwrap();
        book.save(118, StrategyProfile::default()).unwrap();

        let loaded = book.load(118).unwrap();
        assert!(loaded.strengths.is_empty());
        assert!(loaded.capabilities.is_empty());
    }

    #[test]
    fn test_per_team_layout_uses_own_key() {
        let (store, book) = setup(ProfileLayout::PerTeam);
        book.add_list_item(254, ListName::Strengths, "strong intake").unwrap();

        assert!(store.get("strategy_254").unwrap().is_some());
        assert!(store.get(TEAM_STRATEGIES).unwrap().is_none());
        assert_eq!(book.load(254).unwrap().capabilities["consistency"], 3);
    }

    #[test]
    fn test_list_item_editing() {
        let (_, book) = setup(ProfileLayout::Shared);
        book.add_list_item(118, ListName::Weaknesses, "slow").unwrap();
        book.add_list_item(118, ListName::Weaknesses, "fragile").unwrap();
        book.edit_list_item(118, ListName::Weaknesses, 0, "slow auto")
            .unwrap();

        assert_eq!(
            book.remove_list_item(118, ListName::Weaknesses, 1).unwrap(),
            "fragile"
        );
        assert_eq!(book.load(118).unwrap().weaknesses, vec!["slow auto"]);
        assert!(matches!(
            book.remove_list_item(118, ListName::Weaknesses, 5),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            book.add_list_item(118, ListName::Strengths, "  "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_set_capability_clamps() {
        let (_, book) = setup(ProfileLayout::PerTeam);
        assert_eq!(book.set_capability(118, "speed", 9).unwrap(), 5);
        assert_eq!(book.set_capability(118, "speed", -2).unwrap(), 1);
        assert!(matches!(
            book.set_capability(118, "shooting", 3),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_save_rejects_out_of_range() {
        let (store, book) = setup(ProfileLayout::Shared);
        let mut profile = sample();
        profile.capabilities.insert("intake".to_string(), 11);
        assert!(book.save(118, profile).is_err());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_compare_defaults_missing_axes_to_floor() {
        let (_, book) = setup(ProfileLayout::PerTeam);
        book.set_capability(118, "scoring", 5).unwrap();

        let comparison = book.compare(118, 9999).unwrap();
        assert_eq!(comparison.len(), 5);
        assert_eq!(comparison[0].axis, "scoring");
        assert_eq!((comparison[0].team_a, comparison[0].team_b), (5, 1));
        // Untouched axes on a stored profile keep their default.
        assert_eq!((comparison[1].team_a, comparison[1].team_b), (3, 1));
    }

    #[test]
    fn test_list_name_parsing() {
        assert_eq!("strategies".parse::<ListName>().unwrap(), ListName::Recommendations);
        assert!("ideas".parse::<ListName>().is_err());
    }
}
