//! Two-pass ovulation resolution.
//!
//! The personal luteal phase is learned from the resolver's own signal-based
//! estimates, and the resolver's fallback needs that phase. Pass one resolves
//! completed cycles without it; pass two resolves every cycle with it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::luteal::calculate_personal_luteal_phase;
use super::resolver::{resolve_ovulation, OvulationEstimate, ResolveContext};
use crate::cycle::CycleSegment;
use crate::signals::extract_signals;

/// Completed cycles with mucus data needed to trust mucus at full confidence.
pub const MIN_MUCUS_HISTORY_CYCLES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapOptions {
    pub use_mucus_method: bool,
    /// Length assumed for the ongoing cycle when it is shorter than this
    pub expected_cycle_length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    pub personal_luteal_phase: Option<u32>,
    /// Pass-one estimates for completed cycles only
    pub first_pass: Vec<OvulationEstimate>,
    /// Final estimates, one per segment, in segment order
    pub estimates: Vec<OvulationEstimate>,
}

/// Length the resolver anchors a cycle's calendar fallback on.
///
/// The ongoing cycle has not ended yet, so its elapsed length is extended to
/// the expected cycle length.
pub fn resolution_length(segment: &CycleSegment, expected_cycle_length: u32) -> u32 {
    if segment.is_completed {
        segment.length
    } else {
        segment.length.max(expected_cycle_length)
    }
}

/// Whether enough completed cycles carry mucus observations.
pub fn has_sufficient_mucus_history(segments: &[CycleSegment], use_mucus_method: bool) -> bool {
    use_mucus_method
        && segments
            .iter()
            .filter(|s| s.is_completed && s.has_mucus_data())
            .count()
            >= MIN_MUCUS_HISTORY_CYCLES
}

fn resolve_segment(
    segment: &CycleSegment,
    personal_luteal_phase: Option<u32>,
    sufficient_mucus_history: bool,
    options: &BootstrapOptions,
) -> OvulationEstimate {
    let cycle_length = resolution_length(segment, options.expected_cycle_length);
    let signals = extract_signals(
        segment,
        cycle_length,
        personal_luteal_phase,
        options.use_mucus_method,
    );
    resolve_ovulation(
        segment.start_date,
        &signals,
        &ResolveContext {
            cycle_length,
            is_completed: segment.is_completed,
            personal_luteal_phase,
            sufficient_mucus_history,
        },
    )
}

/// Resolve every cycle, learning the personal luteal phase along the way.
pub fn bootstrap_ovulation_estimates(
    segments: &[CycleSegment],
    options: &BootstrapOptions,
) -> BootstrapResult {
    let history = has_sufficient_mucus_history(segments, options.use_mucus_method);

    let first_pass: Vec<OvulationEstimate> = segments
        .iter()
        .filter(|s| s.is_completed)
        .map(|s| resolve_segment(s, None, history, options))
        .collect();

    let personal_luteal_phase = calculate_personal_luteal_phase(&first_pass);
    debug!(
        completed = first_pass.len(),
        ?personal_luteal_phase,
        sufficient_mucus_history = history,
        "luteal phase bootstrap"
    );

    let estimates = segments
        .iter()
        .map(|s| resolve_segment(s, personal_luteal_phase, history, options))
        .collect();

    BootstrapResult {
        personal_luteal_phase,
        first_pass,
        estimates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::CycleEntry;
    use crate::observation::{DailyObservation, MucusAppearance, MucusObservation};
    use crate::ovulation::OvulationMethod;
    use chrono::{Duration, NaiveDate};

    const OPTIONS: BootstrapOptions = BootstrapOptions {
        use_mucus_method: true,
        expected_cycle_length: 28,
    };

    fn segment(start_offset: i64, length: u32, completed: bool, peak: Option<u32>) -> CycleSegment {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(start_offset);
        let mut entries = Vec::new();
        for day in 1..=length {
            let date = start + Duration::days(day as i64 - 1);
            let mut obs = DailyObservation::new(date.format("%Y-%m-%d").to_string());
            obs.bleeding_active = day <= 4;
            if let Some(peak) = peak {
                obs.mucus_observation = Some(if day + 3 >= peak && day <= peak {
                    MucusObservation::Slippery
                } else {
                    MucusObservation::Dry
                });
                if day == peak {
                    obs.mucus_appearance = Some(MucusAppearance::EggWhite);
                }
            }
            entries.push(CycleEntry { cycle_day: day, observation: obs });
        }
        CycleSegment {
            start_date: start,
            end_date: completed.then(|| start + Duration::days(length as i64 - 1)),
            length,
            is_completed: completed,
            entries,
        }
    }

    #[test]
    fn learns_luteal_phase_from_mucus_cycles() {
        // Peak day 15 in a 29-day cycle: ovulation 16, luteal 13
        let segments = vec![
            segment(0, 29, true, Some(15)),
            segment(29, 29, true, Some(15)),
            segment(58, 30, true, None),
            segment(88, 5, false, None),
        ];
        let result = bootstrap_ovulation_estimates(&segments, &OPTIONS);

        assert_eq!(result.first_pass.len(), 3);
        assert_eq!(result.first_pass[0].confidence, 85);
        assert_eq!(result.personal_luteal_phase, Some(13));

        assert_eq!(result.estimates.len(), 4);
        let third = &result.estimates[2];
        assert_eq!(third.method, OvulationMethod::PersonalLuteal);
        assert_eq!(third.ovulation_day, 17);

        // Ongoing cycle is anchored on the expected length
        let current = &result.estimates[3];
        assert_eq!(current.cycle_length, 28);
        assert_eq!(current.ovulation_day, 15);
        assert!(!current.is_completed);
    }

    #[test]
    fn without_signals_phase_stays_unknown() {
        let segments = vec![segment(0, 28, true, None), segment(28, 31, true, None)];
        let result = bootstrap_ovulation_estimates(&segments, &OPTIONS);
        assert_eq!(result.personal_luteal_phase, None);
        assert!(result
            .estimates
            .iter()
            .all(|e| e.method == OvulationMethod::Standard));
        assert_eq!(result.estimates[1].ovulation_day, 17);
    }

    #[test]
    fn mucus_history_requires_flag_and_two_cycles() {
        let segments = vec![segment(0, 28, true, Some(14)), segment(28, 28, true, Some(14))];
        assert!(has_sufficient_mucus_history(&segments, true));
        assert!(!has_sufficient_mucus_history(&segments, false));
        assert!(!has_sufficient_mucus_history(&segments[..1], true));
    }

    #[test]
    fn resolution_length_extends_only_ongoing_cycle() {
        assert_eq!(resolution_length(&segment(0, 24, true, None), 28), 24);
        assert_eq!(resolution_length(&segment(0, 10, false, None), 28), 28);
        assert_eq!(resolution_length(&segment(0, 35, false, None), 28), 35);
    }
}
