use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Alliance, Winner};
use crate::error::{Error, Result};

pub const ALLIANCE_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_number: u32,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state_prov: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rookie_year: Option<i32>,
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub robot_name: String,
    #[serde(default)]
    pub website: String,
}

impl Team {
    pub fn new(team_number: u32, nickname: impl Into<String>) -> Self {
        Self {
            team_number,
            nickname: nickname.into(),
            name: String::new(),
            city: String::new(),
            state_prov: String::new(),
            country: String::new(),
            rookie_year: None,
            school_name: String::new(),
            robot_name: String::new(),
            website: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompLevel {
    #[serde(alias = "p", alias = "pr")]
    Practice,
    #[serde(alias = "qm", alias = "qual")]
    Qualification,
    #[serde(alias = "qf", alias = "sf", alias = "f", alias = "playoffs")]
    Playoff,
}

impl FromStr for CompLevel {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "practice" | "p" | "pr" => Ok(Self::Practice),
            "qualification" | "qm" | "qual" => Ok(Self::Qualification),
            "playoff" | "playoffs" | "qf" | "sf" | "f" => Ok(Self::Playoff),
            _ => Err(Error::Validation(format!("unknown competition level '{s}'"))),
        }
    }
}

impl fmt::Display for CompLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Practice => "practice",
            Self::Qualification => "qualification",
            Self::Playoff => "playoff",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceScore {
    pub total_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub red: AllianceScore,
    pub blue: AllianceScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub match_number: u32,
    pub comp_level: CompLevel,
    pub red_alliance: Vec<u32>,
    pub blue_alliance: Vec<u32>,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_alliance: Option<Winner>,
}

impl Match {
    pub fn scheduled(
        match_number: u32,
        comp_level: CompLevel,
        red_alliance: [u32; ALLIANCE_SIZE],
        blue_alliance: [u32; ALLIANCE_SIZE],
    ) -> Self {
        Self {
            match_number,
            comp_level,
            red_alliance: red_alliance.to_vec(),
            blue_alliance: blue_alliance.to_vec(),
            status: MatchStatus::Scheduled,
            score_breakdown: None,
            winning_alliance: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    #[must_use]
    pub fn alliance_of(&self, team_number: u32) -> Option<Alliance> {
        if self.red_alliance.contains(&team_number) {
            Some(Alliance::Red)
        } else if self.blue_alliance.contains(&team_number) {
            Some(Alliance::Blue)
        } else {
            None
        }
    }

    #[must_use]
    pub fn involves(&self, team_number: u32) -> bool {
        self.alliance_of(team_number).is_some()
    }

    /// True when `team_number` played on the winning alliance.
    #[must_use]
    pub fn won_by(&self, team_number: u32) -> bool {
        if !self.is_completed() {
            return false;
        }
        match (self.winning_alliance.and_then(Winner::alliance), self.alliance_of(team_number)) {
            (Some(winner), Some(alliance)) => winner == alliance,
            _ => false,
        }
    }

    /// Marks the match completed with the given totals. There is no way back
    /// to `Scheduled`.
    pub fn complete(&mut self, red_total: u32, blue_total: u32) {
        self.status = MatchStatus::Completed;
        self.score_breakdown = Some(ScoreBreakdown {
            red: AllianceScore {
                total_points: red_total,
            },
            blue: AllianceScore {
                total_points: blue_total,
            },
        });
        self.winning_alliance = Some(Winner::from_totals(red_total, blue_total));
    }

    /// Checks the structural invariants of a single record.
    pub fn validate(&self) -> Result<()> {
        if self.match_number == 0 {
            return Err(Error::validation("match number must be positive"));
        }

        validate_alliance("red", &self.red_alliance)?;
        validate_alliance("blue", &self.blue_alliance)?;

        if let Some(team) = self
            .red_alliance
            .iter()
            .find(|team| self.blue_alliance.contains(team))
        {
            return Err(Error::Validation(format!(
                "team {team} cannot play on both alliances"
            )));
        }

        match self.status {
            MatchStatus::Completed => {
                let breakdown = self.score_breakdown.ok_or_else(|| {
                    Error::validation("a completed match needs a score breakdown")
                })?;
                let expected =
                    Winner::from_totals(breakdown.red.total_points, breakdown.blue.total_points);
                if self.winning_alliance != Some(expected) {
                    return Err(Error::Validation(format!(
                        "winning alliance must be {expected} for {}-{}",
                        breakdown.red.total_points, breakdown.blue.total_points
                    )));
                }
            }
            MatchStatus::Scheduled => {
                if self.score_breakdown.is_some() || self.winning_alliance.is_some() {
                    return Err(Error::validation(
                        "a scheduled match cannot carry a result",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn validate_alliance(color: &str, teams: &[u32]) -> Result<()> {
    if teams.len() != ALLIANCE_SIZE {
        return Err(Error::Validation(format!(
            "{color} alliance needs exactly {ALLIANCE_SIZE} teams, got {}",
            teams.len()
        )));
    }
    if teams.contains(&0) {
        return Err(Error::Validation(format!(
            "{color} alliance has an invalid team number 0"
        )));
    }
    let distinct: HashSet<_> = teams.iter().collect();
    if distinct.len() != teams.len() {
        return Err(Error::Validation(format!(
            "{color} alliance lists a team twice"
        )));
    }
    Ok(())
}
