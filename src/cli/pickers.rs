use std::fmt;

use crate::types::{Match, Team};

/// Team with nickname for display
pub struct TeamDisplay<'a>(pub &'a Team);

impl fmt::Display for TeamDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let team = self.0;
        if team.nickname.is_empty() {
            write!(f, "{}", team.team_number)
        } else {
            write!(f, "{} - {}", team.team_number, team.nickname)
        }
    }
}

/// One-line match summary: number, level, alliances and result
pub struct MatchDisplay<'a>(pub &'a Match);

impl fmt::Display for MatchDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        let join = |teams: &[u32]| {
            teams
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "#{:<4} {:<13} red [{}]  blue [{}]",
            m.match_number,
            m.comp_level,
            join(&m.red_alliance),
            join(&m.blue_alliance)
        )?;
        match (m.score_breakdown, m.winning_alliance) {
            (Some(score), Some(winner)) => write!(
                f,
                "  {}-{} ({winner})",
                score.red.total_points, score.blue.total_points
            ),
            _ => write!(f, "  {}", m.status),
        }
    }
}

pub fn confirm_action(message: &str, yes: bool, non_interactive: bool) -> anyhow::Result<bool> {
    if yes {
        Ok(true)
    } else if non_interactive {
        anyhow::bail!("--yes is required for destructive operations in non-interactive mode");
    } else {
        Ok(inquire::Confirm::new(message)
            .with_default(false)
            .prompt()?)
    }
}
