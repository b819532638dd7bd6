//! Per-cycle physiological signal extraction.
//!
//! Each extractor scans one cycle's entries for a single signal. The
//! ovulation resolver fuses them.

mod mucus;
mod pain;
mod symptoms;

pub use mucus::{find_peak_mucus_day_in_cycle, score_cervix_mucus_fertility, PEAK_MUCUS_THRESHOLD};
pub use pain::{
    find_ovulation_pain_day_in_cycle, OvulationPainSignal, MIN_OVULATION_PAIN, MIN_VISIBLE_PAIN,
    TRUSTED_OVULATION_PAIN,
};
pub use symptoms::{
    find_symptom_pattern_day, SymptomPatternSignal, DEFAULT_LUTEAL_PHASE, MIN_SYMPTOM_SCORE,
    SYMPTOM_WINDOW_RADIUS,
};

use serde::{Deserialize, Serialize};

use crate::cycle::{CycleEntry, CycleSegment};

/// All signals found in one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleSignals {
    pub peak_mucus_day: Option<u32>,
    pub ovulation_pain: Option<OvulationPainSignal>,
    pub symptom_pattern: Option<SymptomPatternSignal>,
    /// First day with a positive hormone (LH) test
    pub hormone_test_day: Option<u32>,
}

impl CycleSignals {
    pub fn ovulation_pain_day(&self) -> Option<u32> {
        self.ovulation_pain.map(|p| p.cycle_day)
    }

    pub fn symptom_peak_day(&self) -> Option<u32> {
        self.symptom_pattern.map(|s| s.cycle_day)
    }
}

/// First cycle day with a positive hormone test.
pub fn find_positive_hormone_test_day(entries: &[CycleEntry]) -> Option<u32> {
    entries
        .iter()
        .find(|e| e.observation.hormone_test_positive == Some(true))
        .map(|e| e.cycle_day)
}

/// Run every extractor over one cycle.
///
/// `cycle_length` and `luteal_phase` position the symptom search window.
/// With `use_mucus_method` off the mucus signal is never reported.
pub fn extract_signals(
    segment: &CycleSegment,
    cycle_length: u32,
    luteal_phase: Option<u32>,
    use_mucus_method: bool,
) -> CycleSignals {
    let entries = &segment.entries;
    CycleSignals {
        peak_mucus_day: if use_mucus_method {
            find_peak_mucus_day_in_cycle(entries)
        } else {
            None
        },
        ovulation_pain: find_ovulation_pain_day_in_cycle(entries),
        symptom_pattern: find_symptom_pattern_day(entries, cycle_length, luteal_phase),
        hormone_test_day: find_positive_hormone_test_day(entries),
    }
}
