//! Level table configuration and level derivation.
//!
//! The table is configuration, not runtime state: validated once at
//! construction, immutable afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single tier definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    /// Display name of the tier
    pub name: String,
    /// Minimum point total for this tier
    pub min_points: u64,
}

impl LevelDef {
    pub fn new(name: impl Into<String>, min_points: u64) -> Self {
        Self {
            name: name.into(),
            min_points,
        }
    }
}

/// Level table validation failure (fatal at startup)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("level table is empty")]
    Empty,
    #[error("first level threshold must be 0, got {0}")]
    FirstThresholdNonZero(u64),
    #[error("level thresholds must be strictly increasing (violated at index {index})")]
    NonIncreasing { index: usize },
}

/// Ordered, immutable level configuration.
///
/// Invariants enforced at construction: at least one tier, first threshold 0,
/// thresholds strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelDef>", into = "Vec<LevelDef>")]
pub struct LevelTable {
    levels: Vec<LevelDef>,
}

impl LevelTable {
    /// Validate and build a table from tier definitions.
    pub fn new(levels: Vec<LevelDef>) -> Result<Self, TableError> {
        let first = levels.first().ok_or(TableError::Empty)?;
        if first.min_points != 0 {
            return Err(TableError::FirstThresholdNonZero(first.min_points));
        }
        for (index, pair) in levels.windows(2).enumerate() {
            if pair[1].min_points <= pair[0].min_points {
                return Err(TableError::NonIncreasing { index: index + 1 });
            }
        }
        Ok(Self { levels })
    }

    /// Tier definitions, lowest first.
    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    /// Number of tiers (always >= 1).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the terminal tier.
    pub fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    /// Display name for a tier index.
    pub fn name(&self, index: usize) -> &str {
        &self.levels[index].name
    }
}

impl From<LevelTable> for Vec<LevelDef> {
    fn from(table: LevelTable) -> Self {
        table.levels
    }
}

impl TryFrom<Vec<LevelDef>> for LevelTable {
    type Error = TableError;

    fn try_from(levels: Vec<LevelDef>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl Default for LevelTable {
    /// The shipped ten-tier table.
    fn default() -> Self {
        let levels = vec![
            LevelDef::new("Bronze", 0),
            LevelDef::new("Silver", 100),
            LevelDef::new("Gold", 200),
            LevelDef::new("Platinum", 500),
            LevelDef::new("Diamond", 1_000),
            LevelDef::new("Epic", 2_000),
            LevelDef::new("Legendary", 10_000),
            LevelDef::new("Master", 50_000),
            LevelDef::new("GrandMaster", 100_000),
            LevelDef::new("Lord", 1_000_000),
        ];
        // Known-valid; Default cannot surface a TableError
        Self { levels }
    }
}

/// Largest index whose threshold does not exceed `points`.
///
/// Clamps to the terminal tier when `points` meets or exceeds the highest
/// threshold. Pure function of (points, table).
pub fn derive_level(points: u64, table: &LevelTable) -> usize {
    table
        .levels()
        .iter()
        .rposition(|level| level.min_points <= points)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three_tier() -> LevelTable {
        LevelTable::new(vec![
            LevelDef::new("Bronze", 0),
            LevelDef::new("Silver", 100),
            LevelDef::new("Gold", 200),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(LevelTable::new(vec![]), Err(TableError::Empty));
    }

    #[test]
    fn test_nonzero_first_threshold_rejected() {
        let err = LevelTable::new(vec![LevelDef::new("Bronze", 5)]);
        assert_eq!(err, Err(TableError::FirstThresholdNonZero(5)));
    }

    #[test]
    fn test_non_increasing_thresholds_rejected() {
        let err = LevelTable::new(vec![
            LevelDef::new("Bronze", 0),
            LevelDef::new("Silver", 100),
            LevelDef::new("Gold", 100),
        ]);
        assert_eq!(err, Err(TableError::NonIncreasing { index: 2 }));
    }

    #[test]
    fn test_default_table_is_valid() {
        let table = LevelTable::default();
        assert_eq!(table.len(), 10);
        assert!(LevelTable::new(table.levels().to_vec()).is_ok());
    }

    #[test]
    fn test_derive_level_boundaries() {
        let table = three_tier();
        assert_eq!(derive_level(0, &table), 0);
        assert_eq!(derive_level(99, &table), 0);
        assert_eq!(derive_level(100, &table), 1);
        assert_eq!(derive_level(199, &table), 1);
        assert_eq!(derive_level(200, &table), 2);
        // Past the highest threshold: clamped to the terminal tier
        assert_eq!(derive_level(1_000_000, &table), 2);
    }

    #[test]
    fn test_single_tier_table() {
        let table = LevelTable::new(vec![LevelDef::new("Only", 0)]).unwrap();
        assert_eq!(derive_level(0, &table), 0);
        assert_eq!(derive_level(u64::MAX, &table), 0);
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let table = three_tier();
        let json = serde_json::to_string(&table).unwrap();
        let back: LevelTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        // Deserializing a malformed table must fail, not produce a bad engine
        let bad = r#"[{"name":"Bronze","min_points":0},{"name":"Silver","min_points":0}]"#;
        assert!(serde_json::from_str::<LevelTable>(bad).is_err());
    }

    proptest! {
        #[test]
        fn test_derive_level_unique_index(points in 0u64..2_000_000) {
            let table = LevelTable::default();
            let i = derive_level(points, &table);
            prop_assert!(table.levels()[i].min_points <= points);
            if i < table.last_index() {
                prop_assert!(points < table.levels()[i + 1].min_points);
            }
        }

        #[test]
        fn test_derive_level_monotonic(a in 0u64..2_000_000, b in 0u64..2_000_000) {
            let table = LevelTable::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(derive_level(lo, &table) <= derive_level(hi, &table));
        }

        #[test]
        fn test_derive_level_pure(points in 0u64..2_000_000) {
            let table = LevelTable::default();
            prop_assert_eq!(derive_level(points, &table), derive_level(points, &table));
        }
    }
}
