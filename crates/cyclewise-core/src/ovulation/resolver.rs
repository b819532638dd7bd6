//! Fusion of per-cycle signals into one ovulation estimate.
//!
//! Resolution is a fixed cascade; the first rule whose inputs are present
//! wins. A positive hormone test short-circuits the cascade.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::signals::{CycleSignals, DEFAULT_LUTEAL_PHASE};

/// Two signals agree when they are at most this many days apart.
pub const AGREEMENT_TOLERANCE_DAYS: i64 = 2;
/// Confidence reserved for a positive hormone test.
pub const HORMONE_TEST_CONFIDENCE: u8 = 100;
/// Estimates below this are shown with an uncertainty marker.
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 70;

const SYMPTOM_BONUS: u8 = 5;

/// How an ovulation day was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvulationMethod {
    /// Positive hormone (LH) test
    HormoneTest,
    /// Peak mucus cross-validated by ovulation pain
    MucusPain,
    Mucus,
    Pain,
    /// Cycle length minus the learned luteal phase
    PersonalLuteal,
    /// Cycle length minus 14
    Standard,
}

impl OvulationMethod {
    /// Whether the method used anything beyond the textbook 14-day rule.
    pub fn is_advanced(&self) -> bool {
        !matches!(self, OvulationMethod::Standard)
    }

    /// Whether the estimate came from the calendar rather than a body signal.
    pub fn is_fallback(&self) -> bool {
        matches!(self, OvulationMethod::PersonalLuteal | OvulationMethod::Standard)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OvulationMethod::HormoneTest => "hormone test",
            OvulationMethod::MucusPain => "mucus + pain",
            OvulationMethod::Mucus => "cervical mucus",
            OvulationMethod::Pain => "ovulation pain",
            OvulationMethod::PersonalLuteal => "personal luteal phase",
            OvulationMethod::Standard => "standard",
        }
    }
}

/// Best estimate of ovulation for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvulationEstimate {
    pub cycle_start_date: NaiveDate,
    /// 1-based cycle day
    pub ovulation_day: u32,
    /// 0-100; 100 only for a positive hormone test
    pub confidence: u8,
    pub method: OvulationMethod,
    /// Signals seen in the cycle, for diagnostics
    pub signals: CycleSignals,
    /// Length the estimate was resolved against
    pub cycle_length: u32,
    pub is_completed: bool,
}

impl OvulationEstimate {
    pub fn is_low_confidence(&self) -> bool {
        self.method.is_fallback() || self.confidence < LOW_CONFIDENCE_THRESHOLD
    }

    /// Days from ovulation to the end of the cycle.
    pub fn luteal_phase_length(&self) -> i64 {
        self.cycle_length as i64 - self.ovulation_day as i64
    }
}

/// Per-cycle inputs to the resolver besides the signals themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveContext {
    pub cycle_length: u32,
    pub is_completed: bool,
    pub personal_luteal_phase: Option<u32>,
    /// At least two completed cycles carry mucus observations
    pub sufficient_mucus_history: bool,
}

fn agrees(a: i64, b: Option<u32>) -> bool {
    b.is_some_and(|b| (a - b as i64).abs() <= AGREEMENT_TOLERANCE_DAYS)
}

fn to_cycle_day(day: i64) -> u32 {
    day.max(1) as u32
}

/// Resolve a cycle's signals into an ovulation estimate.
pub fn resolve_ovulation(
    cycle_start_date: NaiveDate,
    signals: &CycleSignals,
    ctx: &ResolveContext,
) -> OvulationEstimate {
    let (day, confidence, method) = cascade(signals, ctx);
    trace!(
        %cycle_start_date,
        day,
        confidence,
        method = method.label(),
        "resolved ovulation"
    );

    OvulationEstimate {
        cycle_start_date,
        ovulation_day: to_cycle_day(day),
        confidence,
        method,
        signals: *signals,
        cycle_length: ctx.cycle_length,
        is_completed: ctx.is_completed,
    }
}

fn cascade(signals: &CycleSignals, ctx: &ResolveContext) -> (i64, u8, OvulationMethod) {
    let history = ctx.sufficient_mucus_history;
    let symptom_day = signals.symptom_peak_day();

    // LH surge precedes ovulation by roughly a day
    if let Some(test_day) = signals.hormone_test_day {
        return (test_day as i64 + 1, HORMONE_TEST_CONFIDENCE, OvulationMethod::HormoneTest);
    }

    let mucus_day = signals.peak_mucus_day.map(|peak| peak as i64 + 1);

    match (mucus_day, signals.ovulation_pain) {
        (Some(mucus), Some(pain)) if agrees(mucus, Some(pain.cycle_day)) => {
            let day = ((mucus + pain.cycle_day as i64) as f64 / 2.0).round() as i64;
            if history {
                (day, 95, OvulationMethod::MucusPain)
            } else {
                (day, 65, OvulationMethod::Mucus)
            }
        }
        // Disagreement: mucus wins
        (Some(mucus), Some(_)) => (mucus, if history { 80 } else { 55 }, OvulationMethod::Mucus),
        (Some(mucus), None) => {
            let base = if history { 85 } else { 55 };
            let bonus = if agrees(mucus, symptom_day) { SYMPTOM_BONUS } else { 0 };
            (mucus, base + bonus, OvulationMethod::Mucus)
        }
        (None, Some(pain)) if pain.is_trusted() => {
            let day = pain.cycle_day as i64;
            let bonus = if agrees(day, symptom_day) { SYMPTOM_BONUS } else { 0 };
            (day, 70 + bonus, OvulationMethod::Pain)
        }
        _ => match ctx.personal_luteal_phase {
            Some(luteal) => (
                ctx.cycle_length as i64 - luteal as i64,
                60,
                OvulationMethod::PersonalLuteal,
            ),
            None => (
                ctx.cycle_length as i64 - DEFAULT_LUTEAL_PHASE as i64,
                50,
                OvulationMethod::Standard,
            ),
        },
    }
}
