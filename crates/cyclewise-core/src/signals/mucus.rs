//! Cervical mucus scoring and Peak Day detection.

use crate::cycle::CycleEntry;
use crate::observation::{MucusAppearance, MucusObservation};

/// Scores at or above this count as peak-type mucus.
pub const PEAK_MUCUS_THRESHOLD: u8 = 3;

/// Fertility score (0-4) for one mucus observation.
///
/// | sensation | appearance          | score |
/// |-----------|---------------------|-------|
/// | slippery  | egg white           | 4     |
/// | slippery  | anything else       | 3     |
/// | any       | egg white           | 3     |
/// | wet       | creamy              | 3     |
/// | wet       | none/sticky/missing | 2     |
/// | any       | creamy              | 2     |
/// | moist     | sticky              | 1     |
/// | otherwise |                     | 0     |
pub fn score_cervix_mucus_fertility(
    observation: Option<MucusObservation>,
    appearance: Option<MucusAppearance>,
) -> u8 {
    use MucusAppearance::{Creamy, EggWhite, Sticky};
    use MucusObservation::{Moist, Slippery, Wet};

    match (observation, appearance) {
        (Some(Slippery), Some(EggWhite)) => 4,
        (Some(Slippery), _) | (_, Some(EggWhite)) => 3,
        (Some(Wet), Some(Creamy)) => 3,
        (Some(Wet), _) | (_, Some(Creamy)) => 2,
        (Some(Moist), Some(Sticky)) => 1,
        _ => 0,
    }
}

/// Find the Peak Day of a cycle.
///
/// The Peak Day is the last day of peak-type mucus before the score drops
/// back below [`PEAK_MUCUS_THRESHOLD`]. Days without any mucus observation
/// are skipped rather than read as a drop. If peak mucus is still present at
/// the end of the data, the last peak-type day seen is returned.
pub fn find_peak_mucus_day_in_cycle(entries: &[CycleEntry]) -> Option<u32> {
    let mut candidate: Option<u32> = None;

    for entry in entries.iter().filter(|e| e.observation.has_mucus_data()) {
        let score = score_cervix_mucus_fertility(
            entry.observation.mucus_observation,
            entry.observation.mucus_appearance,
        );

        if score >= PEAK_MUCUS_THRESHOLD {
            candidate = Some(entry.cycle_day);
        } else if candidate.is_some() {
            return candidate;
        }
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::DailyObservation;
    use MucusAppearance as A;
    use MucusObservation as O;

    fn entry(day: u32, obs: Option<O>, app: Option<A>) -> CycleEntry {
        let mut o = DailyObservation::new(format!("2024-01-{day:02}"));
        o.mucus_observation = obs;
        o.mucus_appearance = app;
        CycleEntry { cycle_day: day, observation: o }
    }

    #[test]
    fn lookup_table() {
        assert_eq!(score_cervix_mucus_fertility(Some(O::Slippery), Some(A::EggWhite)), 4);

        assert_eq!(score_cervix_mucus_fertility(Some(O::Slippery), None), 3);
        assert_eq!(score_cervix_mucus_fertility(Some(O::Slippery), Some(A::Sticky)), 3);
        assert_eq!(score_cervix_mucus_fertility(None, Some(A::EggWhite)), 3);
        assert_eq!(score_cervix_mucus_fertility(Some(O::Dry), Some(A::EggWhite)), 3);
        assert_eq!(score_cervix_mucus_fertility(Some(O::Wet), Some(A::Creamy)), 3);
        assert_eq!(score_cervix_mucus_fertility(Some(O::Wet), Some(A::EggWhite)), 3);

        assert_eq!(score_cervix_mucus_fertility(Some(O::Wet), None), 2);
        assert_eq!(score_cervix_mucus_fertility(Some(O::Wet), Some(A::Sticky)), 2);
        assert_eq!(score_cervix_mucus_fertility(None, Some(A::Creamy)), 2);
        assert_eq!(score_cervix_mucus_fertility(Some(O::Moist), Some(A::Creamy)), 2);

        assert_eq!(score_cervix_mucus_fertility(Some(O::Moist), Some(A::Sticky)), 1);

        assert_eq!(score_cervix_mucus_fertility(Some(O::Moist), None), 0);
        assert_eq!(score_cervix_mucus_fertility(Some(O::Dry), Some(A::Sticky)), 0);
        assert_eq!(score_cervix_mucus_fertility(None, Some(A::None)), 0);
        assert_eq!(score_cervix_mucus_fertility(None, None), 0);
    }

    #[test]
    fn slippery_egg_white_is_unique_maximum() {
        let observations = [None, Some(O::Dry), Some(O::Moist), Some(O::Wet), Some(O::Slippery)];
        let appearances = [None, Some(A::None), Some(A::Sticky), Some(A::Creamy), Some(A::EggWhite)];
        for o in observations {
            for a in appearances {
                let score = score_cervix_mucus_fertility(o, a);
                if (o, a) == (Some(O::Slippery), Some(A::EggWhite)) {
                    assert_eq!(score, 4);
                } else {
                    assert!(score < 4, "{o:?}/{a:?} scored {score}");
                }
            }
        }
    }

    #[test]
    fn peak_is_last_high_day_before_drop() {
        // Scores 1, 2, 4, 3, 1 on days 10..14
        let entries = vec![
            entry(10, Some(O::Moist), Some(A::Sticky)),
            entry(11, Some(O::Wet), None),
            entry(12, Some(O::Slippery), Some(A::EggWhite)),
            entry(13, Some(O::Slippery), None),
            entry(14, Some(O::Moist), Some(A::Sticky)),
        ];
        assert_eq!(find_peak_mucus_day_in_cycle(&entries), Some(13));
    }

    #[test]
    fn ongoing_peak_returns_last_high_day() {
        let entries = vec![
            entry(10, Some(O::Wet), None),
            entry(11, Some(O::Slippery), Some(A::EggWhite)),
            entry(12, Some(O::Slippery), Some(A::EggWhite)),
        ];
        assert_eq!(find_peak_mucus_day_in_cycle(&entries), Some(12));
    }

    #[test]
    fn days_without_mucus_data_are_not_a_drop() {
        let entries = vec![
            entry(11, Some(O::Slippery), Some(A::EggWhite)),
            entry(12, None, None),
            entry(13, Some(O::Slippery), None),
            entry(14, Some(O::Dry), None),
        ];
        assert_eq!(find_peak_mucus_day_in_cycle(&entries), Some(13));
    }

    #[test]
    fn no_peak_type_mucus_means_no_peak() {
        let entries = vec![
            entry(10, Some(O::Moist), Some(A::Sticky)),
            entry(11, Some(O::Wet), None),
        ];
        assert_eq!(find_peak_mucus_day_in_cycle(&entries), None);
        assert_eq!(find_peak_mucus_day_in_cycle(&[]), None);
    }
}
