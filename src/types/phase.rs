use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the three timed periods of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Auto,
    Teleop,
    Endgame,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Auto, Phase::Teleop, Phase::Endgame];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Teleop => "teleop",
            Self::Endgame => "endgame",
        }
    }

    pub fn parse(s: &str) -> Option<Phase> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "autonomous" => Some(Self::Auto),
            "teleop" | "teleoperated" => Some(Self::Teleop),
            "endgame" => Some(Self::Endgame),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::Validation(format!("unknown phase '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alliance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            _ => Err(Error::Validation(format!("unknown alliance '{s}'"))),
        }
    }
}

/// Outcome of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Red,
    Blue,
    Tie,
}

impl Winner {
    /// Red wins on a strictly higher total, blue likewise, anything else is a tie.
    #[must_use]
    pub fn from_totals(red_total: u32, blue_total: u32) -> Winner {
        if red_total > blue_total {
            Self::Red
        } else if blue_total > red_total {
            Self::Blue
        } else {
            Self::Tie
        }
    }

    #[must_use]
    pub fn alliance(self) -> Option<Alliance> {
        match self {
            Self::Red => Some(Alliance::Red),
            Self::Blue => Some(Alliance::Blue),
            Self::Tie => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Tie => "tie",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_from_totals() {
        assert_eq!(Winner::from_totals(120, 120), Winner::Tie);
        assert_eq!(Winner::from_totals(150, 100), Winner::Red);
        assert_eq!(Winner::from_totals(80, 95), Winner::Blue);
        assert_eq!(Winner::from_totals(0, 0), Winner::Tie);
    }

    #[test]
    fn test_parse_phase() {
        assert_eq!(Phase::parse("Auto"), Some(Phase::Auto));
        assert_eq!(Phase::parse("teleoperated"), Some(Phase::Teleop));
        assert_eq!(Phase::parse("halftime"), None);
        assert!("halftime".parse::<Phase>().is_err());
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Endgame).unwrap(), "\"endgame\"");
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), "\"tie\"");
    }
}
