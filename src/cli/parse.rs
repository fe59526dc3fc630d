//! Parsers for the compact argument forms used on the command line.

use anyhow::{Context, anyhow, bail};

use crate::heatmap::Point;
use crate::matches::QuickScore;
use crate::notes::TeamMatchPerformance;
use crate::rules::{ActionCounts, ActionValue, Ruleset};
use crate::types::Phase;

fn parse_value(raw: &str) -> anyhow::Result<ActionValue> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Ok(ActionValue::Flag(true)),
        "false" | "no" => Ok(ActionValue::Flag(false)),
        other => other
            .parse::<i64>()
            .map(ActionValue::Count)
            .map_err(|_| anyhow!("expected a count or true/false, got '{raw}'")),
    }
}

fn split_assignment(arg: &str) -> anyhow::Result<(&str, ActionValue)> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=value, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("missing action name in '{arg}'");
    }
    Ok((name, parse_value(value)?))
}

/// `action=value` pairs for one phase.
pub fn parse_actions(args: &[String]) -> anyhow::Result<ActionCounts> {
    let mut counts = ActionCounts::new();
    for arg in args {
        let (action, value) = split_assignment(arg)?;
        counts.set(action, value);
    }
    Ok(counts)
}

/// `phase.action=value` pairs, applied to a fresh quick score in order.
pub fn parse_quick_score(ruleset: &Ruleset, args: &[String]) -> anyhow::Result<QuickScore> {
    let mut score = QuickScore::new();
    for arg in args {
        let (field, value) = split_assignment(arg)?;
        let (phase, action) = field
            .split_once('.')
            .ok_or_else(|| anyhow!("expected phase.action=value, got '{arg}'"))?;
        let phase: Phase = phase.parse()?;
        score.update_score(ruleset, phase, action, value)?;
    }
    Ok(score)
}

pub fn parse_point(arg: &str) -> anyhow::Result<Point> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| anyhow!("expected x,y, got '{arg}'"))?;
    let x: f64 = x.trim().parse().with_context(|| format!("invalid x in '{arg}'"))?;
    let y: f64 = y.trim().parse().with_context(|| format!("invalid y in '{arg}'"))?;
    Ok(Point::new(x, y))
}

/// `team:auto:teleop:endgame[:defense]`
pub fn parse_performance(arg: &str) -> anyhow::Result<(u32, TeamMatchPerformance)> {
    let parts: Vec<&str> = arg.split(':').map(str::trim).collect();
    if !(4..=5).contains(&parts.len()) {
        bail!("expected team:auto:teleop:endgame[:defense], got '{arg}'");
    }
    let number = |i: usize| -> anyhow::Result<u32> {
        parts[i]
            .parse()
            .with_context(|| format!("invalid number '{}' in '{arg}'", parts[i]))
    };

    let mut perf = TeamMatchPerformance {
        auto_points: number(1)?,
        teleop_points: number(2)?,
        endgame_points: number(3)?,
        ..TeamMatchPerformance::default()
    };
    if parts.len() == 5 {
        perf.defense_rating = u8::try_from(number(4)?).unwrap_or(u8::MAX);
    }
    Ok((number(0)?, perf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::reefscape_2025;

    #[test]
    fn test_parse_actions() {
        let counts = parse_actions(&["autoSpeaker=3".into(), "mobility=true".into()]).unwrap();
        assert_eq!(counts.get("autoSpeaker"), Some(ActionValue::Count(3)));
        assert_eq!(counts.get("mobility"), Some(ActionValue::Flag(true)));
        assert!(parse_actions(&["autoSpeaker".into()]).is_err());
        assert!(parse_actions(&["=3".into()]).is_err());
    }

    #[test]
    fn test_parse_quick_score() {
        let rules = reefscape_2025();
        let score = parse_quick_score(
            &rules,
            &["auto.leave=true".into(), "teleop.coralL4=2".into()],
        )
        .unwrap();
        assert_eq!(score.total, 13);
        assert!(parse_quick_score(&rules, &["leave=true".into()]).is_err());
        assert!(parse_quick_score(&rules, &["teleop.net=-1".into()]).is_err());
    }

    #[test]
    fn test_parse_point_and_performance() {
        let point = parse_point("120.5, 80").unwrap();
        assert_eq!((point.x, point.y), (120.5, 80.0));
        assert!(parse_point("12").is_err());

        let (team, perf) = parse_performance("118:6:20:12:4").unwrap();
        assert_eq!(team, 118);
        assert_eq!(perf.total_points(), 38);
        assert_eq!(perf.defense_rating, 4);
        assert_eq!(parse_performance("254:1:2:3").unwrap().1.defense_rating, 3);
        assert!(parse_performance("254:1").is_err());
    }
}
