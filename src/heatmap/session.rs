use tracing::{debug, warn};

use super::{FieldDimensions, Point};
use crate::types::Phase;

/// An in-progress drawing gesture for one team and phase.
///
/// Every appended coordinate is kept in arrival order; nothing is sampled
/// away. Points only reach storage through
/// [`HeatmapModel::save_session`](super::HeatmapModel::save_session).
/// Dropping a session with appended points discards them.
#[derive(Debug)]
pub struct HeatmapSession {
    team_number: u32,
    phase: Phase,
    field: FieldDimensions,
    points: Vec<Point>,
    appended: usize,
}

impl HeatmapSession {
    pub(super) fn new(
        team_number: u32,
        phase: Phase,
        field: FieldDimensions,
        points: Vec<Point>,
    ) -> Self {
        debug!(team = team_number, %phase, seeded = points.len(), "heatmap session started");
        Self {
            team_number,
            phase,
            field,
            points,
            appended: 0,
        }
    }

    pub fn team_number(&self) -> u32 {
        self.team_number
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Records one pointer position, clamped to the field.
    pub fn append_point(&mut self, x: f64, y: f64) {
        self.points.push(self.field.clamp(x, y));
        self.appended += 1;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Ends the gesture and hands back every point, seeded ones included.
    pub fn end(mut self) -> Vec<Point> {
        self.appended = 0;
        std::mem::take(&mut self.points)
    }
}

impl Drop for HeatmapSession {
    fn drop(&mut self) {
        if self.appended > 0 {
            warn!(
                team = self.team_number,
                phase = %self.phase,
                discarded = self.appended,
                "heatmap session abandoned with unsaved points"
            );
        }
    }
}
