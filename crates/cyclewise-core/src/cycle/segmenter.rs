//! Cycle-day numbering.
//!
//! Walks the chronologically sorted observation list once and assigns each
//! record a 1-based cycle day. A new cycle opens on bleeding onset, gated so
//! that spotting shortly after a period does not restart the count.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::observation::DailyObservation;

/// Minimum days since the last bleeding day before bleeding can open a new cycle.
pub const NOISE_GATE_DAYS: i64 = 7;

/// Cycle day assigned to one observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDayAssignment {
    /// Date string exactly as logged
    pub date: String,
    /// `None` until the first bleeding onset has been seen
    pub cycle_day: Option<u32>,
    /// Whether this record opened a new cycle
    pub starts_cycle: bool,
}

/// Running state of the segmenter.
#[derive(Debug, Clone, Default)]
struct SegmenterState {
    cycle_day: Option<u32>,
    previous_date: Option<NaiveDate>,
    previous_bleeding: bool,
    last_bleeding_date: Option<NaiveDate>,
}

impl SegmenterState {
    fn step(&mut self, obs: &DailyObservation) -> CycleDayAssignment {
        let Some(date) = obs.parsed_date() else {
            warn!(date = %obs.date, "unparsable observation date, keeping previous cycle day");
            self.previous_bleeding = obs.bleeding_active;
            return CycleDayAssignment {
                date: obs.date.clone(),
                cycle_day: self.cycle_day,
                starts_cycle: false,
            };
        };

        let diff_days = self
            .previous_date
            .map(|prev| (date - prev).num_days())
            .unwrap_or(0);

        if diff_days > 0 {
            if let Some(day) = self.cycle_day.as_mut() {
                *day += diff_days as u32;
            }
        }

        let mut starts_cycle = false;
        if obs.bleeding_active {
            let onset = !self.previous_bleeding || diff_days > 1 || self.cycle_day.is_none();
            let past_noise_gate = self
                .last_bleeding_date
                .map_or(true, |last| (date - last).num_days() >= NOISE_GATE_DAYS);

            if onset && past_noise_gate {
                self.cycle_day = Some(1);
                starts_cycle = true;
            }
            self.last_bleeding_date = Some(date);
        }

        self.previous_bleeding = obs.bleeding_active;
        self.previous_date = Some(date);

        CycleDayAssignment {
            date: obs.date.clone(),
            cycle_day: self.cycle_day,
            starts_cycle,
        }
    }
}

/// Assign a cycle day to every observation.
///
/// Expects `observations` sorted by date. Days before the first detected
/// bleeding onset get `None`; if no bleeding is ever logged every day does.
pub fn assign_cycle_days(observations: &[DailyObservation]) -> Vec<CycleDayAssignment> {
    let mut state = SegmenterState::default();
    observations.iter().map(|obs| state.step(obs)).collect()
}
