//! End-to-end analysis pipeline.
//!
//! [`analyze`] is the single entry point: it takes an immutable snapshot of
//! the observation list plus explicit options and returns freshly derived
//! structures. Nothing is updated incrementally; any change to the input
//! means a full recomputation. [`CycleEngine`] memoizes the last result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::cycle::{assign_cycle_days, group_into_segments, CycleDayAssignment, CycleSegment};
use crate::observation::DailyObservation;
use crate::ovulation::{bootstrap_ovulation_estimates, BootstrapOptions, OvulationEstimate};
use crate::prediction::{predict_current_cycle, CyclePrediction, PredictionOptions};
use crate::stats::{average_recent_cycle_length, CycleStats};

/// Inputs to one analysis run besides the observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Whether cervical mucus observations feed inference
    pub use_mucus_method: bool,
    /// Reference date for the ongoing cycle
    pub today: NaiveDate,
    pub prediction: PredictionOptions,
}

impl AnalysisOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            use_mucus_method: true,
            today,
            prediction: PredictionOptions::default(),
        }
    }

    pub fn with_mucus_method(mut self, enabled: bool) -> Self {
        self.use_mucus_method = enabled;
        self
    }
}

/// Everything derived from one observation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleAnalysis {
    /// One entry per observation, in input order
    pub cycle_days: Vec<CycleDayAssignment>,
    pub cycles: Vec<CycleSegment>,
    /// One estimate per cycle, in cycle order
    pub estimates: Vec<OvulationEstimate>,
    pub personal_luteal_phase: Option<u32>,
    pub stats: CycleStats,
    /// `None` until a first period has been logged
    pub prediction: Option<CyclePrediction>,
}

impl CycleAnalysis {
    /// The ongoing cycle, if any.
    pub fn current_cycle(&self) -> Option<&CycleSegment> {
        self.cycles.last().filter(|c| !c.is_completed)
    }

    /// Estimate for the cycle that started on `start_date`.
    pub fn estimate_for(&self, start_date: NaiveDate) -> Option<&OvulationEstimate> {
        self.estimates
            .iter()
            .find(|e| e.cycle_start_date == start_date)
    }

    /// Cycle day assigned to a logged date string.
    pub fn cycle_day_for(&self, date: &str) -> Option<u32> {
        self.cycle_days
            .iter()
            .find(|a| a.date == date)
            .and_then(|a| a.cycle_day)
    }
}

/// Run the full pipeline.
///
/// `observations` must be sorted by date (see
/// [`normalize_observations`](crate::observation::normalize_observations)).
pub fn analyze(observations: &[DailyObservation], options: &AnalysisOptions) -> CycleAnalysis {
    let cycle_days = assign_cycle_days(observations);
    let cycles = group_into_segments(&cycle_days, observations, options.today);

    let expected_cycle_length = average_recent_cycle_length(
        &cycles,
        options.prediction.max_cycles,
        options.prediction.default_cycle_length,
    );

    let bootstrap = bootstrap_ovulation_estimates(
        &cycles,
        &BootstrapOptions {
            use_mucus_method: options.use_mucus_method,
            expected_cycle_length,
        },
    );

    let stats = CycleStats::from_segments(&cycles, options.prediction.max_cycles);
    let prediction = predict_current_cycle(
        &cycles,
        &bootstrap.estimates,
        options.today,
        &options.prediction,
    );

    debug!(
        observations = observations.len(),
        cycles = cycles.len(),
        personal_luteal_phase = ?bootstrap.personal_luteal_phase,
        predicted_day = ?prediction.as_ref().map(|p| p.predicted_ovulation_day),
        "cycle analysis complete"
    );

    CycleAnalysis {
        cycle_days,
        cycles,
        estimates: bootstrap.estimates,
        personal_luteal_phase: bootstrap.personal_luteal_phase,
        stats,
        prediction,
    }
}

/// Stable hash of the inputs that determine the analysis.
pub fn fingerprint(observations: &[DailyObservation], use_mucus_method: bool) -> String {
    let mut hasher = Sha256::new();
    for obs in observations {
        match serde_json::to_vec(obs) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(format!("{obs:?}").as_bytes()),
        }
        hasher.update(b"\n");
    }
    hasher.update([use_mucus_method as u8]);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fingerprint: String,
    options: AnalysisOptions,
    analysis: CycleAnalysis,
}

/// Memoizing front of [`analyze`].
///
/// Keeps the most recent result and returns it while neither the
/// observations nor the options have changed.
#[derive(Debug, Clone, Default)]
pub struct CycleEngine {
    cache: Option<CacheEntry>,
}

impl CycleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze, reusing the cached result when the input is unchanged.
    pub fn analyze(
        &mut self,
        observations: &[DailyObservation],
        options: &AnalysisOptions,
    ) -> &CycleAnalysis {
        let key = fingerprint(observations, options.use_mucus_method);
        let hit = self
            .cache
            .as_ref()
            .is_some_and(|c| c.fingerprint == key && c.options == *options);

        if !hit {
            debug!(fingerprint = %key, "recomputing cycle analysis");
            self.cache = None;
        }

        let entry = self.cache.get_or_insert_with(|| CacheEntry {
            fingerprint: key,
            options: options.clone(),
            analysis: analyze(observations, options),
        });
        &entry.analysis
    }

    /// Drop the cached result.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }
}
