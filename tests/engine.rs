//! End-to-end scenarios against the library, backed by a real SQLite file.

use std::sync::Arc;

use scoutbook::analytics::{aggregate, dashboard_summary};
use scoutbook::error::{Error, ErrorCategory};
use scoutbook::heatmap::{HeatmapModel, Point};
use scoutbook::matches::MatchRecordStore;
use scoutbook::rules::builtin::crescendo_2024;
use scoutbook::scouting::{ScoutingEntry, ScoutingLog};
use scoutbook::store::keys::{HEATMAPS, MATCH_DATA};
use scoutbook::store::{SqliteStore, Store};
use scoutbook::strategy::{ListName, StrategyBook};
use scoutbook::teams::TeamRegistry;
use scoutbook::types::{CompLevel, Match, Phase, Winner};
use serde_json::json;
use tempfile::TempDir;

fn open(temp: &TempDir) -> SqliteStore {
    let store = SqliteStore::new(temp.path().join("scoutbook.db")).unwrap();
    store.initialize().unwrap();
    store
}

fn shared(temp: &TempDir) -> Arc<dyn Store> {
    Arc::new(open(temp))
}

#[test]
fn imported_teams_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let payload = json!({
        "teams": [
            {"teamNumber": 9029, "nameShort": "Team NF", "city": "Çankaya", "country": "Türkiye"},
            {"teamNumber": 6436, "nameShort": "Another Team", "rookieYear": 2017}
        ]
    });

    let imported = TeamRegistry::new(shared(&temp)).import_payload(&payload).unwrap();
    assert_eq!(imported.len(), 2);

    let registry = TeamRegistry::new(shared(&temp));
    let numbers: Vec<u32> = registry.list().unwrap().iter().map(|t| t.team_number).collect();
    assert_eq!(numbers, vec![6436, 9029]);
    assert_eq!(registry.get(9029).unwrap().city, "Çankaya");
}

#[test]
fn recorded_result_picks_winner() {
    let temp = TempDir::new().unwrap();
    let matches = MatchRecordStore::new(shared(&temp));
    matches
        .add(Match::scheduled(12, CompLevel::Qualification, [1, 2, 3], [4, 5, 6]))
        .unwrap();

    let record = matches.record_result(12, 80, 95).unwrap();
    assert!(record.is_completed());
    assert_eq!(record.winning_alliance, Some(Winner::Blue));

    let status = matches.status().unwrap();
    assert_eq!(status.current_match, None);
}

#[test]
fn aggregate_without_data_is_zero() {
    let perf = aggregate(&crescendo_2024(), &[], &[], 254);

    assert_eq!(perf.total_avg, 0.0);
    assert_eq!(perf.matches_played, 0);
    assert_eq!(perf.win_rate, 0);
    assert!(perf.per_match.is_empty());
}

#[test]
fn scouted_matches_feed_dashboard() {
    let temp = TempDir::new().unwrap();
    let store = shared(&temp);
    let matches = MatchRecordStore::new(store.clone());
    matches
        .add(Match::scheduled(1, CompLevel::Qualification, [118, 2, 3], [4, 5, 6]))
        .unwrap();
    matches.record_result(1, 60, 40).unwrap();

    let mut entry = ScoutingEntry::new(118, 1);
    entry.teleop.set("teleopSpeaker", 5);
    entry.endgame.set("climb", true);
    ScoutingLog::new(store.clone()).append(entry).unwrap();

    let rules = crescendo_2024();
    let entries = ScoutingLog::new(store.clone()).list().unwrap();
    let schedule = matches.list().unwrap();

    let perf = aggregate(&rules, &entries, &schedule, 118);
    assert_eq!(perf.total_avg, 13.0);
    assert_eq!(perf.win_rate, 100);

    let summary = dashboard_summary(&rules, &entries, &schedule, &[]);
    assert_eq!(summary.teams_scouted, 1);
    assert_eq!(summary.completed_matches, 1);
}

#[test]
fn empty_heatmap_save_clears_stored_points() {
    let temp = TempDir::new().unwrap();
    let store = shared(&temp);
    let heatmaps = HeatmapModel::new(store.clone());

    heatmaps
        .save(Some(118), Phase::Auto, &[Point::new(10.0, 20.0)])
        .unwrap();
    assert_eq!(heatmaps.points(118, Phase::Auto).unwrap().len(), 1);

    assert_eq!(heatmaps.save(Some(118), Phase::Auto, &[]).unwrap(), 0);
    assert!(heatmaps.team_heatmaps(118).unwrap().is_empty());
    assert_eq!(store.get(HEATMAPS).unwrap(), Some(json!({})));
}

#[test]
fn strategy_profile_round_trips_through_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let book = StrategyBook::planning(shared(&temp));
        book.set_capability(118, "defense", 7).unwrap();
        book.add_list_item(118, ListName::Weaknesses, "tips on ramps")
            .unwrap();
    }

    let profile = StrategyBook::planning(shared(&temp)).load(118).unwrap();
    assert_eq!(profile.capabilities.get("defense"), Some(&7));
    assert_eq!(profile.list(ListName::Weaknesses), ["tips on ramps"]);
    assert!(profile.last_updated.is_some());
}

#[test]
fn capacity_exceeded_leaves_state_unchanged() {
    let temp = TempDir::new().unwrap();
    let used = {
        let store = Arc::new(open(&temp));
        MatchRecordStore::new(store.clone())
            .add(Match::scheduled(1, CompLevel::Qualification, [1, 2, 3], [4, 5, 6]))
            .unwrap();
        store.used_bytes().unwrap()
    };

    let store: Arc<dyn Store> = Arc::new(open(&temp).with_capacity(used));
    let before = store.get(MATCH_DATA).unwrap();
    let matches = MatchRecordStore::new(store.clone());

    let err = matches
        .add(Match::scheduled(2, CompLevel::Qualification, [1, 2, 3], [4, 5, 6]))
        .unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(err.category(), ErrorCategory::Storage);
    assert_eq!(store.get(MATCH_DATA).unwrap(), before);
    assert_eq!(matches.list().unwrap().len(), 1);
}
