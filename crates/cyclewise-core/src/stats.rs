//! Cycle statistics.
//!
//! Summaries over recent completed cycles: average length, spread, period
//! length, next period date, and the phase a cycle day falls in.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cycle::CycleSegment;
use crate::ovulation::calculate_fertile_window;

/// Cycle length assumed when nothing has been completed yet.
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;
/// Number of recent completed cycles summaries look at.
pub const DEFAULT_MAX_CYCLES: usize = 6;

/// Aggregate statistics for recent completed cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    /// Completed cycles included in the summary
    pub completed_cycles: usize,
    pub average_cycle_length: Option<f64>,
    pub shortest_cycle: Option<u32>,
    pub longest_cycle: Option<u32>,
    pub average_period_length: Option<f64>,
}

impl CycleStats {
    /// Summarize the most recent `max_cycles` completed cycles.
    pub fn from_segments(segments: &[CycleSegment], max_cycles: usize) -> Self {
        let recent = recent_completed(segments, max_cycles);
        let lengths: Vec<u32> = recent.iter().map(|s| s.length).collect();
        let periods: Vec<u32> = recent.iter().map(|s| s.period_length()).collect();

        Self {
            completed_cycles: recent.len(),
            average_cycle_length: mean(&lengths),
            shortest_cycle: lengths.iter().copied().min(),
            longest_cycle: lengths.iter().copied().max(),
            average_period_length: mean(&periods),
        }
    }

    /// Spread between the shortest and longest cycle.
    pub fn variation(&self) -> Option<u32> {
        Some(self.longest_cycle? - self.shortest_cycle?)
    }
}

fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64)
}

/// The last `max_cycles` completed cycles, oldest first.
pub fn recent_completed(segments: &[CycleSegment], max_cycles: usize) -> Vec<&CycleSegment> {
    let completed: Vec<&CycleSegment> = segments.iter().filter(|s| s.is_completed).collect();
    let skip = completed.len().saturating_sub(max_cycles);
    completed.into_iter().skip(skip).collect()
}

/// Rounded average length of recent completed cycles, or `default_length`.
pub fn average_recent_cycle_length(
    segments: &[CycleSegment],
    max_cycles: usize,
    default_length: u32,
) -> u32 {
    CycleStats::from_segments(segments, max_cycles)
        .average_cycle_length
        .map(|avg| avg.round() as u32)
        .unwrap_or(default_length)
}

/// Expected start of the next period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPeriod {
    pub expected_start: NaiveDate,
    /// Negative when the period is late
    pub days_until: i64,
}

/// Predict the next period from the current cycle's start.
pub fn predict_next_period(current: &CycleSegment, average_length: u32, today: NaiveDate) -> NextPeriod {
    let expected_start = current.start_date + Duration::days(average_length as i64);
    NextPeriod {
        expected_start,
        days_until: (expected_start - today).num_days(),
    }
}

/// Phase of the cycle a day falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Fertile,
    Luteal,
}

impl CyclePhase {
    pub fn label(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Fertile => "fertile",
            CyclePhase::Luteal => "luteal",
        }
    }
}

/// Classify a cycle day. Bleeding days are menstrual even inside the
/// fertile window.
pub fn cycle_phase(cycle_day: u32, period_length: u32, ovulation_day: u32) -> CyclePhase {
    let window = calculate_fertile_window(ovulation_day);
    if cycle_day <= period_length {
        CyclePhase::Menstrual
    } else if window.contains(cycle_day) {
        CyclePhase::Fertile
    } else if cycle_day < window.start {
        CyclePhase::Follicular
    } else {
        CyclePhase::Luteal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::CycleEntry;
    use crate::observation::DailyObservation;

    fn segment(offset: i64, length: u32, period: u32, completed: bool) -> CycleSegment {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset);
        let entries = (1..=period)
            .map(|day| {
                let date = start + Duration::days(day as i64 - 1);
                let mut obs = DailyObservation::new(date.format("%Y-%m-%d").to_string());
                obs.bleeding_active = true;
                CycleEntry { cycle_day: day, observation: obs }
            })
            .collect();
        CycleSegment {
            start_date: start,
            end_date: completed.then(|| start + Duration::days(length as i64 - 1)),
            length,
            is_completed: completed,
            entries,
        }
    }

    #[test]
    fn stats_over_recent_completed_cycles() {
        let segments = vec![
            segment(0, 40, 3, true),
            segment(40, 27, 4, true),
            segment(67, 29, 6, true),
            segment(96, 3, 3, false),
        ];
        let stats = CycleStats::from_segments(&segments, 2);
        assert_eq!(stats.completed_cycles, 2);
        assert_eq!(stats.average_cycle_length, Some(28.0));
        assert_eq!(stats.shortest_cycle, Some(27));
        assert_eq!(stats.longest_cycle, Some(29));
        assert_eq!(stats.variation(), Some(2));
        assert_eq!(stats.average_period_length, Some(5.0));
    }

    #[test]
    fn empty_history_uses_default_length() {
        let segments = vec![segment(0, 3, 3, false)];
        let stats = CycleStats::from_segments(&segments, DEFAULT_MAX_CYCLES);
        assert_eq!(stats.completed_cycles, 0);
        assert_eq!(stats.average_cycle_length, None);
        assert_eq!(stats.variation(), None);
        assert_eq!(
            average_recent_cycle_length(&segments, DEFAULT_MAX_CYCLES, DEFAULT_CYCLE_LENGTH),
            28
        );
    }

    #[test]
    fn average_length_is_rounded() {
        let segments = vec![segment(0, 27, 4, true), segment(27, 30, 4, true)];
        assert_eq!(average_recent_cycle_length(&segments, 6, 28), 29);
    }

    #[test]
    fn next_period_from_average() {
        let current = segment(0, 10, 4, false);
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let next = predict_next_period(&current, 28, today);
        assert_eq!(next.expected_start, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
        assert_eq!(next.days_until, 19);
    }

    #[test]
    fn phases_around_ovulation() {
        assert_eq!(cycle_phase(2, 5, 14), CyclePhase::Menstrual);
        assert_eq!(cycle_phase(7, 5, 14), CyclePhase::Follicular);
        assert_eq!(cycle_phase(9, 5, 14), CyclePhase::Fertile);
        assert_eq!(cycle_phase(15, 5, 14), CyclePhase::Fertile);
        assert_eq!(cycle_phase(16, 5, 14), CyclePhase::Luteal);
        // Short cycle: bleeding overlaps the window
        assert_eq!(cycle_phase(4, 5, 8), CyclePhase::Menstrual);
    }
}
