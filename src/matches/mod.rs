mod quick_score;

pub use quick_score::{QuickScore, QuickScorePair};

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::notes::{MatchAnalyses, TeamAnalyses};
use crate::rules::Ruleset;
use crate::store::keys::{MATCH_ANALYSIS, MATCH_DATA, QUICK_SCORES, TEAM_MATCH_ANALYSIS};
use crate::store::{Store, StoreExt, WriteBatch};
use crate::types::{Match, MatchStatus};

type QuickScores = BTreeMap<u32, QuickScorePair>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleState {
    Scheduled,
    Completed,
    Unknown,
}

/// Where the event stands: the next two matches still to be played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStatus {
    pub current_match: Option<u32>,
    pub next_match: Option<u32>,
    pub status: ScheduleState,
}

/// Match records, kept unique and in ascending match-number order.
///
/// Every mutation builds the next state from what is stored, persists it, and
/// only then returns it. A failed write leaves nothing behind.
pub struct MatchRecordStore {
    store: Arc<dyn Store>,
}

impl MatchRecordStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Match>> {
        let mut matches: Vec<Match> = self.store.load_or_default(MATCH_DATA)?;
        matches.sort_by_key(|m| m.match_number);
        debug!(count = matches.len(), "loaded matches");
        Ok(matches)
    }

    pub fn get(&self, match_number: u32) -> Result<Match> {
        self.list()?
            .into_iter()
            .find(|m| m.match_number == match_number)
            .ok_or_else(|| Error::not_found(format!("match {match_number}")))
    }

    /// Inserts a new match. A completed match has its winner derived from the
    /// score breakdown.
    pub fn add(&self, mut record: Match) -> Result<Match> {
        if let (MatchStatus::Completed, Some(breakdown)) = (record.status, record.score_breakdown) {
            record.complete(breakdown.red.total_points, breakdown.blue.total_points);
        }
        record.validate()?;

        let mut matches = self.list()?;
        if matches.iter().any(|m| m.match_number == record.match_number) {
            return Err(Error::DuplicateMatch(record.match_number));
        }

        matches.push(record.clone());
        matches.sort_by_key(|m| m.match_number);
        self.store.save(MATCH_DATA, &matches)?;

        info!(match_number = record.match_number, "match added");
        Ok(record)
    }

    /// Deletes a match together with its quick scores and every analysis
    /// written about it.
    pub fn remove(&self, match_number: u32) -> Result<Match> {
        let mut matches = self.list()?;
        let index = matches
            .iter()
            .position(|m| m.match_number == match_number)
            .ok_or_else(|| Error::not_found(format!("match {match_number}")))?;
        let removed = matches.remove(index);

        let mut batch = WriteBatch::new();
        batch.put_json(MATCH_DATA, &matches)?;

        let mut quick: QuickScores = self.store.load_or_default(QUICK_SCORES)?;
        if quick.remove(&match_number).is_some() {
            batch.put_json(QUICK_SCORES, &quick)?;
        }

        let mut analyses: MatchAnalyses = self.store.load_or_default(MATCH_ANALYSIS)?;
        if analyses.remove(&match_number).is_some() {
            batch.put_json(MATCH_ANALYSIS, &analyses)?;
        }

        let mut team_analyses: TeamAnalyses = self.store.load_or_default(TEAM_MATCH_ANALYSIS)?;
        let mut touched = false;
        for entries in team_analyses.values_mut() {
            let before = entries.len();
            entries.retain(|a| a.match_number != match_number);
            touched |= entries.len() != before;
        }
        if touched {
            team_analyses.retain(|_, entries| !entries.is_empty());
            batch.put_json(TEAM_MATCH_ANALYSIS, &team_analyses)?;
        }

        self.store.write_batch(&batch)?;

        info!(match_number, "match removed");
        Ok(removed)
    }

    /// Completes a match with the given alliance totals. Re-recording a
    /// completed match overwrites its result; it never returns to scheduled.
    pub fn record_result(&self, match_number: u32, red_total: u32, blue_total: u32) -> Result<Match> {
        let mut matches = self.list()?;
        let record = Self::complete_in(&mut matches, match_number, red_total, blue_total)?;

        self.store.save(MATCH_DATA, &matches)?;

        info!(
            match_number,
            red_total,
            blue_total,
            winner = %record.winning_alliance.map(|w| w.to_string()).unwrap_or_default(),
            "match result recorded"
        );
        Ok(record)
    }

    /// Stores both alliances' quick scores and records the result they imply,
    /// in one write.
    pub fn save_quick_scores(
        &self,
        match_number: u32,
        mut red: QuickScore,
        mut blue: QuickScore,
        ruleset: &Ruleset,
    ) -> Result<Match> {
        red.validate()?;
        blue.validate()?;
        let red_total = red.recompute(ruleset);
        let blue_total = blue.recompute(ruleset);

        let mut matches = self.list()?;
        let record = Self::complete_in(&mut matches, match_number, red_total, blue_total)?;

        let mut quick: QuickScores = self.store.load_or_default(QUICK_SCORES)?;
        quick.insert(match_number, QuickScorePair { red, blue });

        let mut batch = WriteBatch::new();
        batch.put_json(MATCH_DATA, &matches)?;
        batch.put_json(QUICK_SCORES, &quick)?;
        self.store.write_batch(&batch)?;

        info!(match_number, red_total, blue_total, ruleset = %ruleset.name, "quick scores saved");
        Ok(record)
    }

    pub fn quick_scores(&self, match_number: u32) -> Result<Option<QuickScorePair>> {
        let mut quick: QuickScores = self.store.load_or_default(QUICK_SCORES)?;
        Ok(quick.remove(&match_number))
    }

    /// The two lowest-numbered matches still scheduled.
    pub fn status(&self) -> Result<ScheduleStatus> {
        let matches = self.list()?;
        if matches.is_empty() {
            return Ok(ScheduleStatus {
                current_match: None,
                next_match: None,
                status: ScheduleState::Unknown,
            });
        }

        let mut scheduled = matches
            .iter()
            .filter(|m| m.status == MatchStatus::Scheduled)
            .map(|m| m.match_number);

        Ok(match scheduled.next() {
            Some(current) => ScheduleStatus {
                current_match: Some(current),
                next_match: scheduled.next(),
                status: ScheduleState::Scheduled,
            },
            None => ScheduleStatus {
                current_match: None,
                next_match: None,
                status: ScheduleState::Completed,
            },
        })
    }

    /// Replaces the whole schedule, e.g. after refreshing from the event API.
    /// Every record must be valid and numbers unique, or nothing is written.
    pub fn replace_all(&self, mut matches: Vec<Match>) -> Result<usize> {
        let mut seen = HashSet::new();
        for record in &matches {
            record.validate()?;
            if !seen.insert(record.match_number) {
                return Err(Error::DuplicateMatch(record.match_number));
            }
        }

        matches.sort_by_key(|m| m.match_number);
        self.store.save(MATCH_DATA, &matches)?;

        info!(count = matches.len(), "match schedule replaced");
        Ok(matches.len())
    }

    fn complete_in(
        matches: &mut [Match],
        match_number: u32,
        red_total: u32,
        blue_total: u32,
    ) -> Result<Match> {
        let record = matches
            .iter_mut()
            .find(|m| m.match_number == match_number)
            .ok_or_else(|| Error::not_found(format!("match {match_number}")))?;
        record.complete(red_total, blue_total);
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteBook;
    use crate::rules::builtin::reefscape_2025;
    use crate::store::MemoryStore;
    use crate::types::{CompLevel, Phase, Winner};
    use proptest::prelude::*;

    fn setup() -> (Arc<MemoryStore>, MatchRecordStore) {
        let store = Arc::new(MemoryStore::new());
        let matches = MatchRecordStore::new(store.clone());
        (store, matches)
    }

    fn qual(number: u32) -> Match {
        Match::scheduled(number, CompLevel::Qualification, [1, 2, 3], [4, 5, 6])
    }

    #[test]
    fn test_add_keeps_ascending_order() {
        let (_, matches) = setup();
        for n in [5, 1, 3] {
            matches.add(qual(n)).unwrap();
        }
        let numbers: Vec<u32> = matches.list().unwrap().iter().map(|m| m.match_number).collect();
        assert_eq!(numbers, vec![1, 3, 5]);
    }

    #[test]
    fn test_duplicate_leaves_store_identical() {
        let (store, matches) = setup();
        matches.add(qual(7)).unwrap();
        let before = store.get(MATCH_DATA).unwrap();

        let mut dup = qual(7);
        dup.red_alliance = vec![10, 11, 12];
        let err = matches.add(dup).unwrap_err();

        assert!(matches!(err, Error::DuplicateMatch(7)));
        assert_eq!(store.get(MATCH_DATA).unwrap(), before);
    }

    #[test]
    fn test_add_completed_derives_winner() {
        let (_, matches) = setup();
        let mut record = qual(2);
        record.complete(40, 40);
        record.winning_alliance = Some(Winner::Red);

        let added = matches.add(record).unwrap();
        assert_eq!(added.winning_alliance, Some(Winner::Tie));
    }

    #[test]
    fn test_record_result_tie_break() {
        let (_, matches) = setup();
        matches.add(qual(1)).unwrap();
        matches.add(qual(2)).unwrap();

        let tie = matches.record_result(1, 120, 120).unwrap();
        assert_eq!(tie.winning_alliance, Some(Winner::Tie));

        let red = matches.record_result(2, 150, 100).unwrap();
        assert_eq!(red.winning_alliance, Some(Winner::Red));
        assert_eq!(red.status, MatchStatus::Completed);
        assert_eq!(red.score_breakdown.unwrap().blue.total_points, 100);
    }

    #[test]
    fn test_record_result_unknown_match() {
        let (_, matches) = setup();
        assert!(matches!(
            matches.record_result(9, 1, 2),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_failed_write_is_not_observable() {
        let (store, matches) = setup();
        matches.add(qual(1)).unwrap();

        store.fail_writes(true);
        assert!(matches!(matches.add(qual(2)), Err(Error::Storage(_))));
        assert!(matches!(
            matches.record_result(1, 10, 5),
            Err(Error::Storage(_))
        ));
        store.fail_writes(false);

        let listed = matches.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, MatchStatus::Scheduled);
    }

    #[test]
    fn test_remove_cascades_to_owned_records() {
        let (store, matches) = setup();
        let rules = reefscape_2025();
        matches.add(qual(3)).unwrap();
        matches.add(qual(4)).unwrap();

        let mut red = QuickScore::new();
        red.update_score(&rules, Phase::Auto, "leave", true).unwrap();
        matches
            .save_quick_scores(3, red, QuickScore::new(), &rules)
            .unwrap();

        let notes = NoteBook::new(store.clone());
        notes.save_match_analysis(3, "fast cycle", BTreeMap::new()).unwrap();
        notes.add_analysis(1, 3, "missed the climb").unwrap();
        notes.add_analysis(1, 4, "clean run").unwrap();

        let removed = matches.remove(3).unwrap();
        assert_eq!(removed.match_number, 3);

        assert!(matches.quick_scores(3).unwrap().is_none());
        assert!(notes.match_analysis(3).unwrap().is_none());
        let remaining = notes.analyses(1).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].match_number, 4);
        assert!(matches!(matches.remove(3), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_save_quick_scores_records_result() {
        let (_, matches) = setup();
        let rules = reefscape_2025();
        matches.add(qual(8)).unwrap();

        let mut red = QuickScore::new();
        red.update_score(&rules, Phase::Teleop, "coralL4", 4).unwrap();
        let mut blue = QuickScore::new();
        blue.update_score(&rules, Phase::Endgame, "deepCage", true).unwrap();
        // A stale total must not survive the save.
        blue.total = 999;

        let record = matches.save_quick_scores(8, red, blue, &rules).unwrap();
        assert_eq!(record.winning_alliance, Some(Winner::Red));

        let pair = matches.quick_scores(8).unwrap().unwrap();
        assert_eq!(pair.red.total, 20);
        assert_eq!(pair.blue.total, 12);
    }

    #[test]
    fn test_status() {
        let (_, matches) = setup();
        assert_eq!(matches.status().unwrap().status, ScheduleState::Unknown);

        for n in [1, 2, 3] {
            matches.add(qual(n)).unwrap();
        }
        matches.record_result(1, 10, 20).unwrap();

        let status = matches.status().unwrap();
        assert_eq!(status.current_match, Some(2));
        assert_eq!(status.next_match, Some(3));
        assert_eq!(status.status, ScheduleState::Scheduled);

        matches.record_result(2, 1, 1).unwrap();
        matches.record_result(3, 1, 1).unwrap();
        assert_eq!(matches.status().unwrap().status, ScheduleState::Completed);
    }

    #[test]
    fn test_replace_all_rejects_duplicates() {
        let (_, matches) = setup();
        matches.add(qual(1)).unwrap();
        assert!(matches.replace_all(vec![qual(2), qual(2)]).is_err());
        assert_eq!(matches.list().unwrap().len(), 1);

        assert_eq!(matches.replace_all(vec![qual(9), qual(4)]).unwrap(), 2);
        let numbers: Vec<u32> = matches.list().unwrap().iter().map(|m| m.match_number).collect();
        assert_eq!(numbers, vec![4, 9]);
    }

    proptest! {
        /// Property: any insertion order lists strictly ascending.
        #[test]
        fn prop_list_strictly_ascending(numbers in proptest::collection::vec(1u32..500, 1..40)) {
            let (_, matches) = setup();
            for n in &numbers {
                let _ = matches.add(qual(*n));
            }
            let listed: Vec<u32> = matches.list().unwrap().iter().map(|m| m.match_number).collect();
            prop_assert!(listed.windows(2).all(|w| w[0] < w[1]));

            let mut expected = numbers.clone();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(listed, expected);
        }
    }
}
