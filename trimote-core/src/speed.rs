//! Selectable motor speeds
//!
//! The speed table is a fixed list of magnitudes with a cursor moved by the
//! two push buttons. The cursor saturates at both ends; it never wraps.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::{SpeedConfig, MAX_SPEEDS};

/// Capacity of the speed label ("Spd. -32768")
pub const SPEED_LABEL_LEN: usize = 16;

/// Text shown on the speed row
pub type SpeedLabel = String<SPEED_LABEL_LEN>;

/// Errors building a speed table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedTableError {
    /// No speeds to select from
    Empty,
}

/// Ordered speed magnitudes plus the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedTable {
    speeds: Vec<i16, MAX_SPEEDS>,
    index: usize,
}

impl SpeedTable {
    /// Create a table; an out-of-range start index is clamped to the last entry
    pub fn new(speeds: &[i16], index: usize) -> Result<Self, SpeedTableError> {
        // Anything past MAX_SPEEDS is dropped
        let speeds: Vec<i16, MAX_SPEEDS> = speeds.iter().copied().take(MAX_SPEEDS).collect();
        if speeds.is_empty() {
            return Err(SpeedTableError::Empty);
        }
        let index = index.min(speeds.len() - 1);
        Ok(Self { speeds, index })
    }

    /// Build from configuration
    pub fn from_config(config: &SpeedConfig) -> Result<Self, SpeedTableError> {
        Self::new(&config.table, config.default_index)
    }

    /// Currently selected magnitude
    pub fn current(&self) -> i16 {
        self.speeds[self.index]
    }

    /// Currently selected position
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    /// Never true for a constructed table
    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    /// Select the next slower speed, saturating at the first entry
    pub fn step_down(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Select the next faster speed, saturating at the last entry
    pub fn step_up(&mut self) {
        if self.index + 1 < self.speeds.len() {
            self.index += 1;
        }
    }

    /// Format the speed row ("Spd. 12000")
    pub fn label(&self) -> SpeedLabel {
        let mut label = SpeedLabel::new();
        // Longest i16 label is 11 characters
        let _ = write!(label, "Spd. {}", self.current());
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SPEEDS, DEFAULT_SPEED_INDEX};
    use proptest::prelude::*;

    fn default_table() -> SpeedTable {
        SpeedTable::new(&DEFAULT_SPEEDS, DEFAULT_SPEED_INDEX).unwrap()
    }

    #[test]
    fn test_default_selection() {
        let table = default_table();
        assert_eq!(table.index(), 2);
        assert_eq!(table.current(), 12000);
        assert_eq!(table.label().as_str(), "Spd. 12000");
    }

    #[test]
    fn test_step_down_saturates_at_zero() {
        let mut table = default_table();
        table.step_down();
        table.step_down();
        assert_eq!(table.index(), 0);
        table.step_down();
        assert_eq!(table.index(), 0);
        assert_eq!(table.current(), 5000);
    }

    #[test]
    fn test_step_up_saturates_at_last() {
        let mut table = default_table();
        for _ in 0..20 {
            table.step_up();
        }
        assert_eq!(table.index(), DEFAULT_SPEEDS.len() - 1);
        assert_eq!(table.label().as_str(), "Spd. 30000");
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(SpeedTable::new(&[], 0), Err(SpeedTableError::Empty));
    }

    #[test]
    fn test_start_index_clamped() {
        let table = SpeedTable::new(&[1, 2, 3], 9).unwrap();
        assert_eq!(table.index(), 2);
    }

    #[test]
    fn test_single_entry_table() {
        let mut table = SpeedTable::new(&[700], 0).unwrap();
        table.step_up();
        table.step_down();
        assert_eq!(table.current(), 700);
    }

    proptest! {
        #[test]
        fn prop_index_stays_in_range(steps in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut table = default_table();
            for up in steps {
                if up {
                    table.step_up();
                } else {
                    table.step_down();
                }
                prop_assert!(table.index() < table.len());
            }
        }
    }
}
