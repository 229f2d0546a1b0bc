//! Session owner: applies accrual stimuli and writes through to storage.
//!
//! Taps and idle ticks are two independent stimulus sources, but every
//! mutation is serialized through `&mut self`: it applies its delta,
//! re-derives the level, and dispatches the storage write before the next
//! stimulus is considered. Writes happen on the mutation path, so writes for
//! the same key can never land out of order. Storage is best-effort: a failed
//! write is logged and the in-memory total stays authoritative for the
//! session.

use crate::consts::{DEFAULT_POINTS, POINTS_KEY};
use crate::persistence::PointsStore;
use crate::sim::{LevelTable, ProgressionState};
use crate::tuning::Tuning;

/// Drives point accrual for one session.
pub struct AccrualScheduler<S: PointsStore> {
    state: ProgressionState,
    table: LevelTable,
    tuning: Tuning,
    store: S,
}

impl<S: PointsStore> AccrualScheduler<S> {
    /// Start a session: read the persisted total exactly once, before any
    /// mutation, and derive the starting level.
    ///
    /// A missing, unreadable, or unparsable save falls back to the default
    /// starting total.
    pub fn load(store: S, table: LevelTable, tuning: Tuning) -> Self {
        let points = match store.get(POINTS_KEY) {
            Ok(Some(raw)) => match raw.parse::<u64>() {
                Ok(points) => {
                    log::info!("Loaded saved total: {} points", points);
                    points
                }
                Err(_) => {
                    log::warn!("Ignoring unparsable saved total {:?}", raw);
                    DEFAULT_POINTS
                }
            },
            Ok(None) => {
                log::info!("No save found, starting fresh");
                DEFAULT_POINTS
            }
            Err(e) => {
                log::warn!("Save read failed ({}), starting fresh", e);
                DEFAULT_POINTS
            }
        };
        let state = ProgressionState::from_points(points, &table);
        Self {
            state,
            table,
            tuning,
            store,
        }
    }

    /// Current standing.
    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Level table this session runs against.
    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Display name of the current tier.
    pub fn level_name(&self) -> &str {
        self.table.name(self.state.level_index)
    }

    /// Progress toward the next tier, 0-100.
    pub fn progress(&self) -> f64 {
        self.state.progress_to_next_level(&self.table)
    }

    /// One scoring tap. Safe at arbitrary frequency; taps apply in call
    /// order, one at a time, none dropped or batched.
    pub fn apply_tap(&mut self) -> &ProgressionState {
        self.state.apply_delta(self.tuning.points_per_tap, &self.table);
        self.write_through();
        &self.state
    }

    /// One passive income tick. Only runs while the session runs; nothing
    /// accrues offline. Zero points at the shipped tuning.
    pub fn apply_idle_tick(&mut self) -> &ProgressionState {
        self.state
            .apply_delta(self.tuning.idle_points_per_tick(), &self.table);
        self.write_through();
        &self.state
    }

    /// Wipe progress back to zero and persist immediately.
    pub fn reset(&mut self) -> &ProgressionState {
        self.state.set_points(0, &self.table);
        self.write_through();
        log::info!("Progress reset");
        &self.state
    }

    /// Overwrite the total (shop write-back after a transaction). Whether the
    /// player could afford the transaction is the shop's concern, not ours.
    pub fn set_points(&mut self, new_points: u64) -> &ProgressionState {
        self.state.set_points(new_points, &self.table);
        self.write_through();
        &self.state
    }

    /// End the session, handing the backing store back to the caller.
    pub fn into_store(self) -> S {
        self.store
    }

    fn write_through(&mut self) {
        if let Err(e) = self.store.set(POINTS_KEY, &self.state.points.to_string()) {
            log::warn!("Save write failed ({}), keeping in-memory total", e);
        }
    }
}
