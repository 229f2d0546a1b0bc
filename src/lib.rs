//! Tap Tycoon - a tap-to-earn idle clicker
//!
//! Core modules:
//! - `sim`: Deterministic progression core (level table, point state)
//! - `scheduler`: Session owner driving tap/idle accrual with write-through saves
//! - `persistence`: Narrow key-value storage contract and backends
//! - `tuning`: Data-driven economy balance
//! - `feedback`: Transient tap markers (visual only, never persisted)
//! - `profile`: Display-only player identity

pub mod feedback;
pub mod persistence;
pub mod profile;
pub mod scheduler;
pub mod sim;
pub mod tuning;

pub use scheduler::AccrualScheduler;
pub use sim::{LevelDef, LevelTable, ProgressionState, derive_level};
pub use tuning::Tuning;

/// Engine configuration constants
pub mod consts {
    /// Points granted per scoring tap
    pub const POINTS_PER_TAP: u64 = 1;
    /// Passive income per hour at the shipped economy
    pub const PROFIT_PER_HOUR: u64 = 1;
    /// Idle conversion divisor (profit/hour -> points/tick)
    pub const SECONDS_PER_HOUR: u64 = 3600;
    /// Idle tick cadence in seconds
    pub const IDLE_TICK_SECS: f64 = 1.0;

    /// Storage key for the persisted point total
    pub const POINTS_KEY: &str = "points";
    /// Point total assumed when no save exists (the counter starts at 1, not 0)
    pub const DEFAULT_POINTS: u64 = 1;

    /// Tap marker lifetime in driver frames (1s float-up at 60 fps)
    pub const FEEDBACK_TTL_TICKS: u32 = 60;
}

/// Format a point total with thousands separators (1234567 -> "1,234,567")
pub fn format_points(points: u64) -> String {
    let digits = points.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
