//! Team performance statistics.
//!
//! Everything here is a pure function of the entries, matches and teams
//! passed in. Nothing is cached, so a statistic can never drift from the
//! records it was derived from.

mod dashboard;

pub use dashboard::{DashboardSummary, UPCOMING_LIMIT, dashboard_summary};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::rules::Ruleset;
use crate::scouting::ScoutingEntry;
use crate::types::{Match, Team};

/// Points one team scored in one scouted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPerformance {
    pub match_number: u32,
    pub auto: u32,
    pub teleop: u32,
    pub endgame: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPerformance {
    pub team_number: u32,
    pub auto_avg: f64,
    pub teleop_avg: f64,
    pub endgame_avg: f64,
    pub total_avg: f64,
    /// Matches on the schedule that list this team on either alliance.
    pub matches_played: usize,
    pub wins: usize,
    /// Percentage of `matches_played` won, rounded to the nearest integer.
    pub win_rate: u32,
    pub per_match: Vec<MatchPerformance>,
}

fn mean(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Averages the team's scouted points per phase and counts its wins.
///
/// A team with no scouting entries gets zero averages; a team on no match
/// gets a zero win rate.
#[must_use]
pub fn aggregate(
    ruleset: &Ruleset,
    entries: &[ScoutingEntry],
    matches: &[Match],
    team_number: u32,
) -> TeamPerformance {
    let per_match: Vec<MatchPerformance> = entries
        .iter()
        .filter(|entry| entry.team_number == team_number)
        .map(|entry| {
            let scores = entry.scores(ruleset);
            MatchPerformance {
                match_number: entry.match_number,
                auto: scores.auto,
                teleop: scores.teleop,
                endgame: scores.endgame,
                total: scores.total(),
            }
        })
        .collect();

    let sum = |f: fn(&MatchPerformance) -> u32| -> u64 {
        per_match.iter().map(|p| u64::from(f(p))).sum()
    };
    let scouted = per_match.len();

    let matches_played = matches.iter().filter(|m| m.involves(team_number)).count();
    let wins = matches.iter().filter(|m| m.won_by(team_number)).count();
    let win_rate = if matches_played == 0 {
        0
    } else {
        (wins as f64 / matches_played as f64 * 100.0).round() as u32
    };

    TeamPerformance {
        team_number,
        auto_avg: mean(sum(|p| p.auto), scouted),
        teleop_avg: mean(sum(|p| p.teleop), scouted),
        endgame_avg: mean(sum(|p| p.endgame), scouted),
        total_avg: mean(sum(|p| p.total), scouted),
        matches_played,
        wins,
        win_rate,
        per_match,
    }
}

/// The team with the highest average total among teams that have been
/// scouted at least once.
///
/// Ties go to the lowest team number. A field where every scouted team
/// averages zero has no top performer. Scouted teams missing from `teams`
/// are not candidates.
#[must_use]
pub fn top_performer<'a>(
    ruleset: &Ruleset,
    entries: &[ScoutingEntry],
    matches: &[Match],
    teams: &'a [Team],
) -> Option<&'a Team> {
    let scouted: BTreeSet<u32> = entries.iter().map(|e| e.team_number).collect();

    let mut candidates: Vec<&Team> = teams
        .iter()
        .filter(|team| scouted.contains(&team.team_number))
        .collect();
    candidates.sort_by_key(|team| team.team_number);

    let mut best: Option<(&Team, f64)> = None;
    for team in candidates {
        let avg = aggregate(ruleset, entries, matches, team.team_number).total_avg;
        let leader = best.map_or(0.0, |(_, top)| top);
        if avg > leader {
            best = Some((team, avg));
        }
    }
    best.map(|(team, _)| team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ActionCounts;
    use crate::rules::builtin::crescendo_2024;
    use crate::types::CompLevel;

    fn entry(team: u32, match_number: u32, speaker: i64, climb: bool) -> ScoutingEntry {
        let mut entry = ScoutingEntry::new(team, match_number);
        entry.auto = ActionCounts::new().with("autoSpeaker", speaker);
        entry.endgame = ActionCounts::new().with("climb", climb);
        entry
    }

    fn completed(number: u32, red: [u32; 3], blue: [u32; 3], r: u32, b: u32) -> Match {
        let mut m = Match::scheduled(number, CompLevel::Qualification, red, blue);
        m.complete(r, b);
        m
    }

    #[test]
    fn test_aggregate_without_data_is_zero() {
        let perf = aggregate(&crescendo_2024(), &[], &[], 118);
        assert_eq!(perf.auto_avg, 0.0);
        assert_eq!(perf.total_avg, 0.0);
        assert_eq!(perf.matches_played, 0);
        assert_eq!(perf.win_rate, 0);
        assert!(perf.per_match.is_empty());
    }

    #[test]
    fn test_aggregate_averages_and_win_rate() {
        let rules = crescendo_2024();
        let entries = vec![
            entry(118, 1, 2, true),
            entry(118, 2, 1, false),
            entry(254, 1, 5, true),
        ];
        let matches = vec![
            completed(1, [118, 2, 3], [254, 5, 6], 40, 30),
            completed(2, [4, 5, 6], [118, 8, 9], 50, 20),
            Match::scheduled(3, CompLevel::Qualification, [118, 2, 3], [4, 5, 6]),
        ];

        let perf = aggregate(&rules, &entries, &matches, 118);
        assert_eq!(perf.auto_avg, 6.0);
        assert_eq!(perf.endgame_avg, 1.5);
        assert_eq!(perf.total_avg, 7.5);
        assert_eq!(perf.matches_played, 3);
        assert_eq!(perf.wins, 1);
        assert_eq!(perf.win_rate, 33);
        assert_eq!(perf.per_match[0].total, 11);
    }

    #[test]
    fn test_tie_does_not_count_as_win() {
        let matches = vec![completed(1, [118, 2, 3], [4, 5, 6], 10, 10)];
        let perf = aggregate(&crescendo_2024(), &[], &matches, 118);
        assert_eq!(perf.matches_played, 1);
        assert_eq!(perf.wins, 0);
    }

    #[test]
    fn test_top_performer_breaks_ties_by_lowest_number() {
        let rules = crescendo_2024();
        let teams = vec![Team::new(254, "Cheesy Poofs"), Team::new(118, "Robonauts")];
        let entries = vec![entry(254, 1, 3, false), entry(118, 1, 3, false)];

        let top = top_performer(&rules, &entries, &[], &teams).unwrap();
        assert_eq!(top.team_number, 118);
    }

    #[test]
    fn test_top_performer_requires_points() {
        let rules = crescendo_2024();
        let teams = vec![Team::new(118, "Robonauts"), Team::new(1678, "Citrus Circuits")];
        assert!(top_performer(&rules, &[], &[], &teams).is_none());

        let entries = vec![entry(118, 1, 0, false)];
        assert!(top_performer(&rules, &entries, &[], &teams).is_none());

        let entries = vec![entry(118, 1, 0, false), entry(1678, 1, 1, false)];
        let top = top_performer(&rules, &entries, &[], &teams).unwrap();
        assert_eq!(top.team_number, 1678);
    }

    #[test]
    fn test_top_performer_skips_unregistered_teams() {
        let rules = crescendo_2024();
        let teams = vec![Team::new(118, "Robonauts")];
        let entries = vec![entry(9999, 1, 5, true), entry(118, 1, 1, false)];

        let top = top_performer(&rules, &entries, &[], &teams).unwrap();
        assert_eq!(top.team_number, 118);
    }
}
