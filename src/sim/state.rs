//! Progression state: the authoritative point total and its derived level.

use serde::{Deserialize, Serialize};

use super::levels::{LevelTable, derive_level};

/// The player's current standing.
///
/// `level_index` is re-derived from `points` in the same step as every point
/// mutation, so readers never observe an inconsistent pair. Only `points` is
/// ever persisted; the index is always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Current point total
    pub points: u64,
    /// Index into the level table, derived from `points`
    pub level_index: usize,
}

impl ProgressionState {
    /// Build a state from a point total, deriving the level index.
    pub fn from_points(points: u64, table: &LevelTable) -> Self {
        Self {
            points,
            level_index: derive_level(points, table),
        }
    }

    /// Add earned points and re-derive the level in one step.
    ///
    /// Saturating add (a corrupt save near u64::MAX must not wrap).
    pub fn apply_delta(&mut self, delta: u64, table: &LevelTable) {
        self.points = self.points.saturating_add(delta);
        self.level_index = derive_level(self.points, table);
    }

    /// Hard-set the point total (reset, shop write-back) and re-derive.
    pub fn set_points(&mut self, points: u64, table: &LevelTable) {
        self.points = points;
        self.level_index = derive_level(self.points, table);
    }

    /// Progress toward the next tier as a percentage in [0, 100].
    ///
    /// The terminal tier reads 100. The raw ratio can transiently exceed 100
    /// between a point update and its promotion; clamped.
    pub fn progress_to_next_level(&self, table: &LevelTable) -> f64 {
        if self.level_index >= table.last_index() {
            return 100.0;
        }
        let current_min = table.levels()[self.level_index].min_points;
        let next_min = table.levels()[self.level_index + 1].min_points;
        let earned = self.points.saturating_sub(current_min) as f64;
        let span = (next_min - current_min) as f64;
        (earned / span * 100.0).min(100.0)
    }
}
