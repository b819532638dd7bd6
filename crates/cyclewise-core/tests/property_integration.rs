//! Property tests for segmentation, resolution and prediction invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use cyclewise_core::cycle::NOISE_GATE_DAYS;
use cyclewise_core::ovulation::{ResolveContext, MAX_LUTEAL_PHASE, MIN_LUTEAL_PHASE};
use cyclewise_core::signals::{OvulationPainSignal, SymptomPatternSignal};
use cyclewise_core::{
    analyze, assign_cycle_days, calculate_fertile_window, calculate_personal_luteal_phase,
    fingerprint, is_fertile_day, resolve_ovulation, AnalysisOptions, CycleSignals,
    DailyObservation, MucusAppearance, MucusObservation, OvulationEstimate, OvulationMethod,
};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

const MUCUS: [Option<MucusObservation>; 5] = [
    None,
    Some(MucusObservation::Dry),
    Some(MucusObservation::Moist),
    Some(MucusObservation::Wet),
    Some(MucusObservation::Slippery),
];

const APPEARANCE: [Option<MucusAppearance>; 5] = [
    None,
    Some(MucusAppearance::None),
    Some(MucusAppearance::Sticky),
    Some(MucusAppearance::Creamy),
    Some(MucusAppearance::EggWhite),
];

#[derive(Debug, Clone)]
struct DayPlan {
    gap: i64,
    bleeding: bool,
    mucus: usize,
    appearance: usize,
    ovulation_pain: Option<u8>,
    visible_pain: Option<u8>,
    hormone: Option<bool>,
}

fn day_plan() -> impl Strategy<Value = DayPlan> {
    (
        1i64..4,
        prop::bool::weighted(0.2),
        0usize..5,
        0usize..5,
        prop::option::of(0u8..=10),
        prop::option::of(0u8..=10),
        prop::option::weighted(0.05, any::<bool>()),
    )
        .prop_map(
            |(gap, bleeding, mucus, appearance, ovulation_pain, visible_pain, hormone)| DayPlan {
                gap,
                bleeding,
                mucus,
                appearance,
                ovulation_pain,
                visible_pain,
                hormone,
            },
        )
}

fn build_log(plans: &[DayPlan]) -> Vec<DailyObservation> {
    let mut date = base();
    plans
        .iter()
        .map(|plan| {
            date += Duration::days(plan.gap);
            let mut obs = DailyObservation::new(date.format("%Y-%m-%d").to_string());
            obs.bleeding_active = plan.bleeding;
            obs.mucus_observation = MUCUS[plan.mucus];
            obs.mucus_appearance = APPEARANCE[plan.appearance];
            obs.ovulation_pain_intensity = plan.ovulation_pain.map(f64::from);
            obs.overall_pain_intensity = plan.visible_pain.map(f64::from);
            obs.hormone_test_positive = plan.hormone;
            obs
        })
        .collect()
}

fn options_for(observations: &[DailyObservation], use_mucus: bool) -> AnalysisOptions {
    let today = observations
        .last()
        .and_then(|o| o.parsed_date())
        .unwrap_or_else(base);
    AnalysisOptions::new(today).with_mucus_method(use_mucus)
}

fn estimate(length: u32, day: u32, confidence: u8) -> OvulationEstimate {
    OvulationEstimate {
        cycle_start_date: base(),
        ovulation_day: day,
        confidence,
        method: OvulationMethod::Mucus,
        signals: CycleSignals::default(),
        cycle_length: length,
        is_completed: true,
    }
}

fn context(history: bool) -> ResolveContext {
    ResolveContext {
        cycle_length: 30,
        is_completed: true,
        personal_luteal_phase: None,
        sufficient_mucus_history: history,
    }
}

proptest! {
    #[test]
    fn prop_noise_gate_holds(plans in prop::collection::vec(day_plan(), 1..80)) {
        let observations = build_log(&plans);
        let assignments = assign_cycle_days(&observations);

        let mut last_bleeding: Option<NaiveDate> = None;
        for (assignment, obs) in assignments.iter().zip(&observations) {
            let date = obs.parsed_date().unwrap();
            if assignment.starts_cycle {
                prop_assert!(obs.bleeding_active);
                prop_assert_eq!(assignment.cycle_day, Some(1));
                if let Some(last) = last_bleeding {
                    prop_assert!((date - last).num_days() >= NOISE_GATE_DAYS);
                }
            }
            if obs.bleeding_active {
                last_bleeding = Some(date);
            }
        }
    }

    #[test]
    fn prop_no_bleeding_no_cycle_days(plans in prop::collection::vec(day_plan(), 1..40)) {
        let mut observations = build_log(&plans);
        for obs in &mut observations {
            obs.bleeding_active = false;
        }
        prop_assert!(assign_cycle_days(&observations).iter().all(|a| a.cycle_day.is_none()));
    }

    #[test]
    fn prop_luteal_phase_bounds(
        samples in prop::collection::vec((15u32..60, 1u32..15, 0u8..=100), 0..12)
    ) {
        let estimates: Vec<_> = samples
            .iter()
            .map(|&(length, day, conf)| estimate(length, day, conf))
            .collect();
        let qualifying = estimates.iter().filter(|e| e.confidence >= 70).count();

        match calculate_personal_luteal_phase(&estimates) {
            None => prop_assert!(qualifying < 2),
            Some(phase) => {
                prop_assert!(qualifying >= 2);
                prop_assert!((MIN_LUTEAL_PHASE..=MAX_LUTEAL_PHASE).contains(&phase));
            }
        }
    }

    #[test]
    fn prop_fertile_window_is_contiguous(ovulation_day in 1u32..60) {
        let window = calculate_fertile_window(ovulation_day);
        prop_assert!(window.start >= 1);
        prop_assert!(window.days() <= 7);
        prop_assert!(window.contains(ovulation_day));

        let fertile: Vec<u32> = (0..80).filter(|&d| is_fertile_day(d, Some(ovulation_day))).collect();
        prop_assert_eq!(fertile.first().copied(), Some(window.start));
        prop_assert_eq!(fertile.last().copied(), Some(window.end));
        prop_assert_eq!(fertile.len() as u32, window.days());
    }

    #[test]
    fn prop_agreeing_symptoms_never_lower_confidence(
        peak in prop::option::of(8u32..20),
        pain_day in prop::option::of(8u32..22),
        pain_intensity in 3.0f64..10.0,
        offset in -2i64..=2,
        history in any::<bool>(),
    ) {
        let signals = CycleSignals {
            peak_mucus_day: peak,
            ovulation_pain: pain_day.map(|d| OvulationPainSignal { cycle_day: d, intensity: pain_intensity }),
            ..Default::default()
        };
        let without = resolve_ovulation(base(), &signals, &context(history));

        let symptom_day = (without.ovulation_day as i64 + offset).max(1) as u32;
        let with_symptoms = CycleSignals {
            symptom_pattern: Some(SymptomPatternSignal { cycle_day: symptom_day, score: 1.0 }),
            ..signals
        };
        let with = resolve_ovulation(base(), &with_symptoms, &context(history));

        prop_assert!(with.confidence >= without.confidence);
    }

    #[test]
    fn prop_agreeing_pain_never_lowers_trusted_mucus(
        peak in 8u32..20,
        offset in -2i64..=2,
        pain_intensity in 3.0f64..10.0,
        symptoms in any::<bool>(),
    ) {
        let mucus_day = peak + 1;
        let symptom_pattern = symptoms.then_some(SymptomPatternSignal { cycle_day: mucus_day, score: 1.0 });
        let mucus_only = CycleSignals {
            peak_mucus_day: Some(peak),
            symptom_pattern,
            ..Default::default()
        };
        let corroborated = CycleSignals {
            ovulation_pain: Some(OvulationPainSignal {
                cycle_day: (mucus_day as i64 + offset) as u32,
                intensity: pain_intensity,
            }),
            ..mucus_only
        };

        let before = resolve_ovulation(base(), &mucus_only, &context(true));
        let after = resolve_ovulation(base(), &corroborated, &context(true));
        prop_assert!(after.confidence >= before.confidence);
    }

    #[test]
    fn prop_hormone_test_is_the_only_certainty(
        peak in prop::option::of(5u32..25),
        pain_day in prop::option::of(5u32..25),
        hormone_day in prop::option::of(5u32..25),
        history in any::<bool>(),
        luteal in prop::option::of(10u32..=16),
    ) {
        let signals = CycleSignals {
            peak_mucus_day: peak,
            ovulation_pain: pain_day.map(|d| OvulationPainSignal { cycle_day: d, intensity: 8.0 }),
            symptom_pattern: None,
            hormone_test_day: hormone_day,
        };
        let ctx = ResolveContext { personal_luteal_phase: luteal, ..context(history) };
        let estimate = resolve_ovulation(base(), &signals, &ctx);
        prop_assert_eq!(estimate.confidence == 100, hormone_day.is_some());
    }

    #[test]
    fn prop_hormone_override_end_to_end(plans in prop::collection::vec(day_plan(), 1..120)) {
        let observations = build_log(&plans);
        let analysis = analyze(&observations, &options_for(&observations, true));

        for (cycle, estimate) in analysis.cycles.iter().zip(&analysis.estimates) {
            let has_positive = cycle
                .entries
                .iter()
                .any(|e| e.observation.hormone_test_positive == Some(true));
            prop_assert_eq!(estimate.confidence == 100, has_positive);
        }
    }

    #[test]
    fn prop_pipeline_is_deterministic(
        plans in prop::collection::vec(day_plan(), 0..120),
        use_mucus in any::<bool>(),
    ) {
        let observations = build_log(&plans);
        let options = options_for(&observations, use_mucus);

        let first = analyze(&observations, &options);
        let second = analyze(&observations, &options);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(fingerprint(&observations, use_mucus), fingerprint(&observations, use_mucus));

        prop_assert_eq!(first.estimates.len(), first.cycles.len());
        prop_assert!(first.estimates.iter().all(|e| e.confidence <= 100 && e.ovulation_day >= 1));
    }
}
