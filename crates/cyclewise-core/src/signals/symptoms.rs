//! Peri-ovulatory symptom pattern detection.
//!
//! Fatigue, bloating and pelvic pain outside of bleeding tend to cluster
//! around ovulation. The pattern is only ever used to corroborate another
//! signal.

use serde::{Deserialize, Serialize};

use crate::cycle::CycleEntry;
use crate::observation::{SYMPTOM_BLOATING, SYMPTOM_FATIGUE, SYMPTOM_PELVIC_PAIN};

/// Luteal phase assumed when no personal value is known.
pub const DEFAULT_LUTEAL_PHASE: u32 = 14;
/// Half-width of the search window around the expected ovulation day.
pub const SYMPTOM_WINDOW_RADIUS: i64 = 5;
/// A day's combined score must exceed this to count as a pattern.
pub const MIN_SYMPTOM_SCORE: f64 = 0.5;

/// Day with the strongest symptom cluster near the expected ovulation day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymptomPatternSignal {
    pub cycle_day: u32,
    pub score: f64,
}

fn day_score(entry: &CycleEntry) -> f64 {
    let obs = &entry.observation;
    let mut score = obs.symptom_score(SYMPTOM_FATIGUE) + obs.symptom_score(SYMPTOM_BLOATING);
    if !obs.bleeding_active {
        score += obs.symptom_score(SYMPTOM_PELVIC_PAIN);
    }
    score
}

/// Find the symptom peak within five days of the expected ovulation day.
///
/// The expected day is `cycle_length - luteal_phase`, falling back to
/// [`DEFAULT_LUTEAL_PHASE`]. Returns `None` when no day in the window scores
/// above [`MIN_SYMPTOM_SCORE`].
pub fn find_symptom_pattern_day(
    entries: &[CycleEntry],
    cycle_length: u32,
    luteal_phase: Option<u32>,
) -> Option<SymptomPatternSignal> {
    let expected = cycle_length as i64 - luteal_phase.unwrap_or(DEFAULT_LUTEAL_PHASE) as i64;
    let window = (expected - SYMPTOM_WINDOW_RADIUS)..=(expected + SYMPTOM_WINDOW_RADIUS);

    let mut best: Option<SymptomPatternSignal> = None;
    for entry in entries.iter().filter(|e| window.contains(&(e.cycle_day as i64))) {
        let score = day_score(entry);
        if score > MIN_SYMPTOM_SCORE && best.map_or(true, |b| score > b.score) {
            best = Some(SymptomPatternSignal {
                cycle_day: entry.cycle_day,
                score,
            });
        }
    }
    best
}
