//! Economy balance knobs.
//!
//! Kept separate from session state so a balance pass can ship as data.

use serde::{Deserialize, Serialize};

use crate::consts::{POINTS_PER_TAP, PROFIT_PER_HOUR, SECONDS_PER_HOUR};

/// Economy tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    /// Points granted per scoring tap
    pub points_per_tap: u64,
    /// Passive income per hour, converted to a per-second tick delta
    pub profit_per_hour: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            points_per_tap: POINTS_PER_TAP,
            profit_per_hour: PROFIT_PER_HOUR,
        }
    }
}

impl Tuning {
    /// Points added by one idle tick.
    ///
    /// Integer floor of profit_per_hour / 3600. At the shipped value of 1
    /// this is 0: idle income is a hook for a later economy and ships
    /// disabled.
    pub fn idle_points_per_tick(&self) -> u64 {
        self.profit_per_hour / SECONDS_PER_HOUR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_idle_income_is_zero() {
        assert_eq!(Tuning::default().idle_points_per_tick(), 0);
    }

    #[test]
    fn test_idle_income_floors() {
        let tuning = Tuning {
            profit_per_hour: 3599,
            ..Default::default()
        };
        assert_eq!(tuning.idle_points_per_tick(), 0);

        let tuning = Tuning {
            profit_per_hour: 7200,
            ..Default::default()
        };
        assert_eq!(tuning.idle_points_per_tick(), 2);
    }

    #[test]
    fn test_tuning_loads_from_json() {
        let tuning: Tuning =
            serde_json::from_str(r#"{"points_per_tap":5,"profit_per_hour":7200}"#).unwrap();
        assert_eq!(tuning.points_per_tap, 5);
        assert_eq!(tuning.idle_points_per_tick(), 2);
    }
}
