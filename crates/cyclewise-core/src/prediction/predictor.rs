//! Cross-cycle ovulation prediction for the ongoing cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::qualifier::{ConfidenceQualifier, DEFAULT_UNCERTAINTY_MARKER, MIN_CYCLES_FOR_CERTAINTY};
use crate::cycle::CycleSegment;
use crate::ovulation::{calculate_fertile_window, FertileWindow, OvulationEstimate};
use crate::signals::DEFAULT_LUTEAL_PHASE;
use crate::stats::{
    average_recent_cycle_length, cycle_phase, predict_next_period, CyclePhase, NextPeriod,
    DEFAULT_CYCLE_LENGTH, DEFAULT_MAX_CYCLES,
};

/// Confidence reported when no completed cycle backs the prediction.
const FALLBACK_CONFIDENCE: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionOptions {
    /// Most recent completed cycles to average over
    pub max_cycles: usize,
    pub default_cycle_length: u32,
    pub min_cycles_for_certainty: usize,
    pub uncertainty_marker: String,
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
            default_cycle_length: DEFAULT_CYCLE_LENGTH,
            min_cycles_for_certainty: MIN_CYCLES_FOR_CERTAINTY,
            uncertainty_marker: DEFAULT_UNCERTAINTY_MARKER.to_string(),
        }
    }
}

/// Confidence-weighted ovulation day across completed cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedOvulationDay {
    pub day: u32,
    /// Mean confidence of contributing estimates
    pub confidence: u8,
    pub based_on_cycles: usize,
    pub uses_advanced_signals: bool,
}

/// Everything shown about the ongoing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePrediction {
    pub cycle_start_date: NaiveDate,
    pub current_cycle_day: u32,
    pub predicted_ovulation_day: u32,
    /// Negative once the predicted day has passed
    pub days_until_ovulation: i64,
    pub fertile_window: FertileWindow,
    pub is_fertile_today: bool,
    pub confidence: u8,
    pub based_on_cycles: usize,
    pub uses_advanced_signals: bool,
    pub qualifier: ConfidenceQualifier,
    pub phase: CyclePhase,
    pub next_period: NextPeriod,
}

impl CyclePrediction {
    /// Predicted ovulation day with the uncertainty marker applied.
    pub fn display_ovulation_day(&self) -> String {
        self.qualifier.format_day(self.predicted_ovulation_day)
    }
}

/// Weighted average of the most recent completed estimates.
///
/// Each day is weighted by its confidence. `None` when no completed cycle
/// has been resolved.
pub fn weighted_ovulation_day(
    estimates: &[OvulationEstimate],
    max_cycles: usize,
) -> Option<WeightedOvulationDay> {
    let completed: Vec<&OvulationEstimate> = estimates.iter().filter(|e| e.is_completed).collect();
    let recent = &completed[completed.len().saturating_sub(max_cycles)..];

    let total_weight: f64 = recent.iter().map(|e| e.confidence as f64).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let weighted: f64 = recent
        .iter()
        .map(|e| e.ovulation_day as f64 * e.confidence as f64)
        .sum();

    Some(WeightedOvulationDay {
        day: ((weighted / total_weight).round() as u32).max(1),
        confidence: (total_weight / recent.len() as f64).round() as u8,
        based_on_cycles: recent.len(),
        uses_advanced_signals: recent.iter().any(|e| e.method.is_advanced()),
    })
}

/// Predict ovulation for the ongoing cycle.
///
/// Returns `None` when there is no ongoing cycle, i.e. no period has ever
/// been logged.
pub fn predict_current_cycle(
    segments: &[CycleSegment],
    estimates: &[OvulationEstimate],
    today: NaiveDate,
    options: &PredictionOptions,
) -> Option<CyclePrediction> {
    let current = segments.last().filter(|s| !s.is_completed)?;

    let average_length =
        average_recent_cycle_length(segments, options.max_cycles, options.default_cycle_length);

    let weighted = weighted_ovulation_day(estimates, options.max_cycles).unwrap_or_else(|| {
        WeightedOvulationDay {
            day: average_length.saturating_sub(DEFAULT_LUTEAL_PHASE).max(1),
            confidence: FALLBACK_CONFIDENCE,
            based_on_cycles: 0,
            uses_advanced_signals: false,
        }
    });

    let current_cycle_day = current.cycle_day_of(today).unwrap_or(current.length);
    let fertile_window = calculate_fertile_window(weighted.day);

    Some(CyclePrediction {
        cycle_start_date: current.start_date,
        current_cycle_day,
        predicted_ovulation_day: weighted.day,
        days_until_ovulation: weighted.day as i64 - current_cycle_day as i64,
        fertile_window,
        is_fertile_today: fertile_window.contains(current_cycle_day),
        confidence: weighted.confidence,
        based_on_cycles: weighted.based_on_cycles,
        uses_advanced_signals: weighted.uses_advanced_signals,
        qualifier: ConfidenceQualifier::for_prediction(
            weighted.based_on_cycles,
            options.min_cycles_for_certainty,
            weighted.uses_advanced_signals,
            &options.uncertainty_marker,
        ),
        phase: cycle_phase(current_cycle_day, current.period_length(), weighted.day),
        next_period: predict_next_period(current, average_length, today),
    })
}
