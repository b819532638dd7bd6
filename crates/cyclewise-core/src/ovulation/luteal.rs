//! Personal luteal-phase estimation.

use super::resolver::OvulationEstimate;

pub const MIN_LUTEAL_PHASE: u32 = 10;
pub const MAX_LUTEAL_PHASE: u32 = 16;
/// Only estimates at least this confident feed the learned phase.
pub const MIN_QUALIFYING_CONFIDENCE: u8 = 70;
pub const MIN_QUALIFYING_CYCLES: usize = 2;

/// Average luteal phase over completed, high-confidence cycles.
///
/// Returns `None` with fewer than [`MIN_QUALIFYING_CYCLES`] qualifying
/// estimates. The result is clamped to
/// [`MIN_LUTEAL_PHASE`]..=[`MAX_LUTEAL_PHASE`].
pub fn calculate_personal_luteal_phase(estimates: &[OvulationEstimate]) -> Option<u32> {
    let phases: Vec<i64> = estimates
        .iter()
        .filter(|e| e.is_completed && e.confidence >= MIN_QUALIFYING_CONFIDENCE)
        .map(OvulationEstimate::luteal_phase_length)
        .collect();

    if phases.len() < MIN_QUALIFYING_CYCLES {
        return None;
    }

    let mean = phases.iter().sum::<i64>() as f64 / phases.len() as f64;
    let clamped = mean
        .round()
        .clamp(MIN_LUTEAL_PHASE as f64, MAX_LUTEAL_PHASE as f64);
    Some(clamped as u32)
}
