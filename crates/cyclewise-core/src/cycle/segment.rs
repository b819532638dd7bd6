//! Grouping of numbered days into cycles.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::segmenter::{assign_cycle_days, CycleDayAssignment};
use crate::observation::DailyObservation;

/// One observation together with its cycle day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleEntry {
    pub cycle_day: u32,
    pub observation: DailyObservation,
}

/// A menstrual cycle derived from the observation list.
///
/// Segments are rebuilt from scratch whenever the observations change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSegment {
    pub start_date: NaiveDate,
    /// Last day of the cycle; `None` for the ongoing cycle
    pub end_date: Option<NaiveDate>,
    /// Length in days (days elapsed so far for the ongoing cycle)
    pub length: u32,
    pub is_completed: bool,
    /// Entries in date order
    pub entries: Vec<CycleEntry>,
}

impl CycleSegment {
    /// Observation logged on a given cycle day, if any.
    pub fn entry_on_day(&self, cycle_day: u32) -> Option<&DailyObservation> {
        self.entries
            .iter()
            .find(|e| e.cycle_day == cycle_day)
            .map(|e| &e.observation)
    }

    /// Number of consecutive bleeding days from cycle day 1.
    pub fn period_length(&self) -> u32 {
        let mut expected = 1;
        for entry in &self.entries {
            if entry.cycle_day < expected {
                continue;
            }
            if entry.cycle_day != expected || !entry.observation.bleeding_active {
                break;
            }
            expected += 1;
        }
        expected - 1
    }

    /// Whether any entry carries a cervical mucus observation.
    pub fn has_mucus_data(&self) -> bool {
        self.entries.iter().any(|e| e.observation.has_mucus_data())
    }

    /// Cycle day of `date` within this segment.
    pub fn cycle_day_of(&self, date: NaiveDate) -> Option<u32> {
        if date < self.start_date {
            return None;
        }
        if let Some(end) = self.end_date {
            if date > end {
                return None;
            }
        }
        Some((date - self.start_date).num_days() as u32 + 1)
    }
}

/// Build cycle segments from a date-sorted observation list.
///
/// `as_of` is the reference date for the ongoing cycle's elapsed length.
/// Observations before the first bleeding onset belong to no cycle.
pub fn build_cycle_segments(observations: &[DailyObservation], as_of: NaiveDate) -> Vec<CycleSegment> {
    let assignments = assign_cycle_days(observations);
    group_into_segments(&assignments, observations, as_of)
}

/// Group already numbered observations into segments.
///
/// `assignments` must be the output of [`assign_cycle_days`] for the same
/// `observations`.
pub fn group_into_segments(
    assignments: &[CycleDayAssignment],
    observations: &[DailyObservation],
    as_of: NaiveDate,
) -> Vec<CycleSegment> {
    let mut starts: Vec<NaiveDate> = Vec::new();
    let mut groups: Vec<Vec<CycleEntry>> = Vec::new();

    for (assignment, obs) in assignments.iter().zip(observations) {
        if assignment.starts_cycle {
            // starts_cycle is only ever set on records with a parsed date
            if let Some(date) = obs.parsed_date() {
                starts.push(date);
                groups.push(Vec::new());
            }
        }
        if let (Some(day), Some(group)) = (assignment.cycle_day, groups.last_mut()) {
            group.push(CycleEntry {
                cycle_day: day,
                observation: obs.clone(),
            });
        }
    }

    let count = starts.len();
    starts
        .iter()
        .zip(groups)
        .enumerate()
        .map(|(i, (&start_date, entries))| {
            let max_day = entries.iter().map(|e| e.cycle_day).max().unwrap_or(1);
            if i + 1 < count {
                let next_start = starts[i + 1];
                CycleSegment {
                    start_date,
                    end_date: Some(next_start - Duration::days(1)),
                    length: (next_start - start_date).num_days() as u32,
                    is_completed: true,
                    entries,
                }
            } else {
                let elapsed = (as_of - start_date).num_days() + 1;
                let length = if elapsed > 0 { (elapsed as u32).max(max_day) } else { max_day };
                CycleSegment {
                    start_date,
                    end_date: None,
                    length,
                    is_completed: false,
                    entries,
                }
            }
        })
        .collect()
}

/// Cycle day for any calendar date, logged or not.
pub fn cycle_day_on(segments: &[CycleSegment], date: NaiveDate) -> Option<u32> {
    segments.iter().find_map(|s| s.cycle_day_of(date))
}
