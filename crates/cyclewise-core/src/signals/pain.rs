//! Ovulation pain (mittelschmerz) detection.

use serde::{Deserialize, Serialize};

use crate::cycle::CycleEntry;

/// Minimum ovulation pain intensity for a day to be considered at all.
pub const MIN_OVULATION_PAIN: f64 = 3.0;
/// Minimum pain visible on the pain chart on the same day.
pub const MIN_VISIBLE_PAIN: f64 = 3.0;
/// Intensity at which the pain signal is trusted on its own.
pub const TRUSTED_OVULATION_PAIN: f64 = 5.0;

/// The strongest credible ovulation-pain day of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvulationPainSignal {
    pub cycle_day: u32,
    pub intensity: f64,
}

impl OvulationPainSignal {
    /// Whether the pain is strong enough to stand without corroboration.
    pub fn is_trusted(&self) -> bool {
        self.intensity >= TRUSTED_OVULATION_PAIN
    }
}

/// Find the day with the strongest credible ovulation pain.
///
/// A day only qualifies when its ovulation pain is at least
/// [`MIN_OVULATION_PAIN`] and the pain chart for that day also shows at
/// least [`MIN_VISIBLE_PAIN`]. Ties go to the earliest day.
pub fn find_ovulation_pain_day_in_cycle(entries: &[CycleEntry]) -> Option<OvulationPainSignal> {
    let mut best: Option<OvulationPainSignal> = None;

    for entry in entries {
        let Some(intensity) = entry.observation.ovulation_pain_intensity else {
            continue;
        };
        if intensity < MIN_OVULATION_PAIN || entry.observation.visible_pain_level() < MIN_VISIBLE_PAIN {
            continue;
        }
        if best.map_or(true, |b| intensity > b.intensity) {
            best = Some(OvulationPainSignal {
                cycle_day: entry.cycle_day,
                intensity,
            });
        }
    }

    best
}
