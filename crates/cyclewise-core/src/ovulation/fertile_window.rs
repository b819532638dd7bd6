//! Fertile window around an ovulation day.

use serde::{Deserialize, Serialize};

/// Days sperm survive before ovulation.
pub const SPERM_VIABILITY_DAYS: u32 = 5;
/// Days the egg survives after ovulation.
pub const EGG_VIABILITY_DAYS: u32 = 1;

/// Inclusive cycle-day bounds of the fertile window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertileWindow {
    pub start: u32,
    pub end: u32,
}

impl FertileWindow {
    pub fn contains(&self, cycle_day: u32) -> bool {
        (self.start..=self.end).contains(&cycle_day)
    }

    /// Number of days in the window.
    pub fn days(&self) -> u32 {
        self.end + 1 - self.start
    }
}

/// Fertile window for an ovulation day.
pub fn calculate_fertile_window(ovulation_day: u32) -> FertileWindow {
    FertileWindow {
        start: ovulation_day.saturating_sub(SPERM_VIABILITY_DAYS).max(1),
        end: ovulation_day + EGG_VIABILITY_DAYS,
    }
}

/// Whether `cycle_day` falls in the fertile window. Always `false` without
/// an ovulation day.
pub fn is_fertile_day(cycle_day: u32, ovulation_day: Option<u32>) -> bool {
    ovulation_day.is_some_and(|ov| calculate_fertile_window(ov).contains(cycle_day))
}
