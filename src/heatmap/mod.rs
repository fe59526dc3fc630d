//! Field heatmaps: point sets per team and match phase.

mod session;

pub use session::HeatmapSession;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::keys::HEATMAPS;
use crate::store::{Store, StoreExt};
use crate::types::Phase;

pub const DEFAULT_FIELD_WIDTH: f64 = 800.0;
pub const DEFAULT_FIELD_HEIGHT: f64 = 500.0;

fn default_intensity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            intensity: default_intensity(),
        }
    }
}

/// Size of the drawing surface. Points live in `0..=width` x `0..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl FieldDimensions {
    #[must_use]
    pub fn clamp(&self, x: f64, y: f64) -> Point {
        let axis = |v: f64, max: f64| if v.is_finite() { v.clamp(0.0, max) } else { 0.0 };
        Point::new(axis(x, self.width), axis(y, self.height))
    }

    fn clamp_point(&self, point: &Point) -> Point {
        Point {
            intensity: point.intensity,
            ..self.clamp(point.x, point.y)
        }
    }
}

pub type TeamHeatmaps = BTreeMap<Phase, Vec<Point>>;
type HeatmapMap = BTreeMap<u32, TeamHeatmaps>;

/// Heatmaps persisted as one map, team to phase to points, under a single key.
pub struct HeatmapModel {
    store: Arc<dyn Store>,
    key: &'static str,
    field: FieldDimensions,
}

impl HeatmapModel {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_key(store, HEATMAPS)
    }

    /// Uses another store key, e.g. `team_heatmaps`.
    pub fn with_key(store: Arc<dyn Store>, key: &'static str) -> Self {
        Self {
            store,
            key,
            field: FieldDimensions::default(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDimensions) -> Self {
        self.field = field;
        self
    }

    pub fn field(&self) -> FieldDimensions {
        self.field
    }

    fn load_all(&self) -> Result<HeatmapMap> {
        self.store.load_or_default(self.key)
    }

    pub fn team_heatmaps(&self, team_number: u32) -> Result<TeamHeatmaps> {
        Ok(self.load_all()?.remove(&team_number).unwrap_or_default())
    }

    pub fn points(&self, team_number: u32, phase: Phase) -> Result<Vec<Point>> {
        Ok(self
            .team_heatmaps(team_number)?
            .remove(&phase)
            .unwrap_or_default())
    }

    /// Opens a drawing session that starts from the points already stored.
    pub fn begin_session(&self, team_number: u32, phase: Phase) -> Result<HeatmapSession> {
        let existing = self.points(team_number, phase)?;
        Ok(HeatmapSession::new(team_number, phase, self.field, existing))
    }

    /// Replaces the stored points for `(team, phase)`. Saving no points
    /// clears the phase.
    pub fn save(&self, team_number: Option<u32>, phase: Phase, points: &[Point]) -> Result<usize> {
        let team_number = team_number.ok_or_else(|| Error::validation("no team selected"))?;
        if team_number == 0 {
            return Err(Error::validation("no team selected"));
        }
        if points.is_empty() {
            self.clear(team_number, phase)?;
            return Ok(0);
        }

        let points: Vec<Point> = points.iter().map(|p| self.field.clamp_point(p)).collect();
        let count = points.len();

        let mut all = self.load_all()?;
        all.entry(team_number).or_default().insert(phase, points);
        self.store.save(self.key, &all)?;

        info!(team = team_number, %phase, points = count, key = self.key, "heatmap saved");
        Ok(count)
    }

    pub fn save_session(&self, session: HeatmapSession) -> Result<usize> {
        let team_number = session.team_number();
        let phase = session.phase();
        let points = session.end();
        self.save(Some(team_number), phase, &points)
    }

    /// Removes one phase. A team left with no phases is removed entirely.
    /// Returns whether anything was stored.
    pub fn clear(&self, team_number: u32, phase: Phase) -> Result<bool> {
        let mut all = self.load_all()?;
        let Some(team) = all.get_mut(&team_number) else {
            return Ok(false);
        };
        if team.remove(&phase).is_none() {
            return Ok(false);
        }
        if team.is_empty() {
            all.remove(&team_number);
        }

        self.store.save(self.key, &all)?;
        info!(team = team_number, %phase, key = self.key, "heatmap cleared");
        Ok(true)
    }
}
