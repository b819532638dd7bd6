//! Prediction for the ongoing cycle.

mod predictor;
mod qualifier;

pub use predictor::{
    predict_current_cycle, weighted_ovulation_day, CyclePrediction, PredictionOptions,
    WeightedOvulationDay,
};
pub use qualifier::{ConfidenceQualifier, DEFAULT_UNCERTAINTY_MARKER, MIN_CYCLES_FOR_CERTAINTY};
