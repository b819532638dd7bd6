//! # Cyclewise Core Library
//!
//! This library provides the inference engine behind Cyclewise, a personal
//! cycle tracker. It turns a sparse daily log into numbered cycles, a
//! per-cycle ovulation estimate with confidence, a fertile window, and a
//! prediction for the ongoing cycle. The CLI and any UI are thin layers over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Cycle segmentation**: bleeding onset, gated against spotting, opens a
//!   new cycle
//! - **Signals**: cervical mucus Peak Day, ovulation pain and symptom
//!   clusters, each extracted independently per cycle
//! - **Ovulation**: a fixed-priority resolver fuses the signals; a two-pass
//!   bootstrap learns the personal luteal phase that feeds its fallback
//! - **Prediction**: confidence-weighted average over recent cycles
//!
//! Every inference function is pure and total. Missing data lowers the
//! confidence of an answer and never produces an error.
//!
//! ## Key Components
//!
//! - [`analyze`]: Single entry point over an observation snapshot
//! - [`CycleEngine`]: Memoizing wrapper around [`analyze`]
//! - [`EngineConfig`]: TOML configuration

pub mod config;
pub mod cycle;
pub mod error;
pub mod observation;
pub mod ovulation;
pub mod pipeline;
pub mod prediction;
pub mod report;
pub mod signals;
pub mod stats;

pub use config::EngineConfig;
pub use cycle::{assign_cycle_days, build_cycle_segments, CycleDayAssignment, CycleEntry, CycleSegment};
pub use error::{ConfigError, CoreError, ValidationError};
pub use observation::{
    load_observations, normalize_observations, DailyObservation, MucusAppearance,
    MucusObservation, OvulationPainSide, PainEvent, PainRegion, SymptomEntry,
};
pub use ovulation::{
    calculate_fertile_window, calculate_personal_luteal_phase, is_fertile_day, resolve_ovulation,
    FertileWindow, OvulationEstimate, OvulationMethod,
};
pub use pipeline::{analyze, fingerprint, AnalysisOptions, CycleAnalysis, CycleEngine};
pub use prediction::{ConfidenceQualifier, CyclePrediction, PredictionOptions};
pub use signals::{
    find_ovulation_pain_day_in_cycle, find_peak_mucus_day_in_cycle, find_symptom_pattern_day,
    score_cervix_mucus_fertility, CycleSignals,
};
pub use stats::{CyclePhase, CycleStats, NextPeriod};
