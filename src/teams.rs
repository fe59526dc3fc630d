use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::store::keys::TEAMS;
use crate::store::{Store, StoreExt};
use crate::types::Team;

/// A team as the event API reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeamRecord {
    pub team_number: u32,
    #[serde(default)]
    pub name_full: Option<String>,
    #[serde(default)]
    pub name_short: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub rookie_year: Option<i32>,
    #[serde(default)]
    pub robot_name: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl From<RawTeamRecord> for Team {
    fn from(raw: RawTeamRecord) -> Self {
        Team {
            team_number: raw.team_number,
            nickname: raw.name_short.unwrap_or_default(),
            name: raw.name_full.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            state_prov: raw.state_prov.unwrap_or_default(),
            country: raw.country.unwrap_or_default(),
            rookie_year: raw.rookie_year,
            school_name: raw.school_name.unwrap_or_default(),
            robot_name: raw.robot_name.unwrap_or_default(),
            website: raw.website.unwrap_or_default(),
        }
    }
}

/// Parses the `teams` array of an import payload. Any malformed record
/// rejects the whole payload.
pub fn parse_payload(payload: &Value) -> Result<Vec<Team>> {
    let records = payload
        .get("teams")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::validation("invalid data format: missing teams array"))?;

    let mut seen = HashSet::new();
    let mut teams = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let raw: RawTeamRecord = serde_json::from_value(record.clone())
            .map_err(|e| Error::Validation(format!("team record {index}: {e}")))?;
        if raw.team_number == 0 {
            return Err(Error::Validation(format!(
                "team record {index}: team number must be positive"
            )));
        }
        if !seen.insert(raw.team_number) {
            return Err(Error::Validation(format!(
                "team {} appears more than once",
                raw.team_number
            )));
        }
        teams.push(Team::from(raw));
    }
    Ok(teams)
}

pub struct TeamRegistry {
    store: Arc<dyn Store>,
}

impl TeamRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Replaces the team list with the payload's teams.
    pub fn import_payload(&self, payload: &Value) -> Result<Vec<Team>> {
        let mut teams = parse_payload(payload)?;
        teams.sort_by_key(|t| t.team_number);
        self.store.save(TEAMS, &teams)?;

        info!(count = teams.len(), "teams imported");
        Ok(teams)
    }

    pub fn list(&self) -> Result<Vec<Team>> {
        let teams: Vec<Team> = self.store.load_or_default(TEAMS)?;
        debug!(count = teams.len(), "loaded teams");
        Ok(teams)
    }

    pub fn get(&self, team_number: u32) -> Result<Team> {
        self.list()?
            .into_iter()
            .find(|t| t.team_number == team_number)
            .ok_or_else(|| Error::not_found(format!("team {team_number}")))
    }

    /// Teams whose number contains `query`, or whose nickname contains it
    /// ignoring case. An empty query matches everything.
    pub fn search(&self, query: &str) -> Result<Vec<Team>> {
        let query = query.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|team| {
                team.team_number.to_string().contains(&query)
                    || team.nickname.to_lowercase().contains(&query)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn registry() -> (Arc<MemoryStore>, TeamRegistry) {
        let store = Arc::new(MemoryStore::new());
        let registry = TeamRegistry::new(store.clone());
        (store, registry)
    }

    fn payload() -> Value {
        json!({
            "teamCountTotal": 2,
            "teams": [
                {
                    "teamNumber": 9029,
                    "nameFull": "Family/Community",
                    "nameShort": "Team NF",
                    "city": "Çankaya",
                    "stateProv": "Ankara",
                    "country": "Türkiye",
                    "rookieYear": 2023,
                    "robotName": "",
                    "schoolName": "Family/Community"
                },
                {
                    "teamNumber": 6436,
                    "nameFull": "Another Team Full Name",
                    "nameShort": "Another Team",
                    "city": "Another City",
                    "stateProv": "Another State",
                    "country": "Turkey",
                    "rookieYear": 2017,
                    "robotName": null,
                    "schoolName": "Another School"
                }
            ]
        })
    }

    #[test]
    fn test_import_maps_fields() {
        let (_, registry) = registry();
        let teams = registry.import_payload(&payload()).unwrap();
        assert_eq!(teams.len(), 2);

        let nf = registry.get(9029).unwrap();
        assert_eq!(nf.nickname, "Team NF");
        assert_eq!(nf.name, "Family/Community");
        assert_eq!(nf.state_prov, "Ankara");
        assert_eq!(nf.rookie_year, Some(2023));
        assert_eq!(registry.get(6436).unwrap().robot_name, "");
        assert!(matches!(registry.get(1), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_import_rejects_bad_shape() {
        let (store, registry) = registry();
        for bad in [
            json!({}),
            json!({"teams": {"teamNumber": 1}}),
            json!({"teams": [{"nameShort": "no number"}]}),
            json!({"teams": [{"teamNumber": 5}, {"teamNumber": 5}]}),
        ] {
            assert!(matches!(
                registry.import_payload(&bad),
                Err(Error::Validation(_))
            ));
        }
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_search() {
        let (_, registry) = registry();
        registry.import_payload(&payload()).unwrap();

        assert_eq!(registry.search("90").unwrap()[0].team_number, 9029);
        assert_eq!(registry.search("another").unwrap()[0].team_number, 6436);
        assert_eq!(registry.search("TEAM").unwrap().len(), 2);
        assert!(registry.search("xyz").unwrap().is_empty());
    }
}
