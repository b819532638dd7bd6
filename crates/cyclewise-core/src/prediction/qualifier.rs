//! Uncertainty marking for displayed estimates.

use serde::{Deserialize, Serialize};

use crate::ovulation::OvulationEstimate;

/// Marker used when nothing else is configured.
pub const DEFAULT_UNCERTAINTY_MARKER: &str = "~";
/// Completed cycles needed before predictions are shown without a marker.
pub const MIN_CYCLES_FOR_CERTAINTY: usize = 3;

/// Whether an estimate should be shown as approximate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceQualifier {
    pub approximate: bool,
    pub marker: String,
}

impl ConfidenceQualifier {
    /// Qualifier for a cross-cycle prediction.
    ///
    /// Approximate when backed by fewer than `min_cycles` completed cycles or
    /// when no body signal contributed.
    pub fn for_prediction(
        based_on_cycles: usize,
        min_cycles: usize,
        uses_advanced_signals: bool,
        marker: &str,
    ) -> Self {
        Self {
            approximate: based_on_cycles < min_cycles || !uses_advanced_signals,
            marker: marker.to_string(),
        }
    }

    /// Qualifier for a single cycle's estimate.
    pub fn for_estimate(estimate: &OvulationEstimate, marker: &str) -> Self {
        Self {
            approximate: estimate.is_low_confidence(),
            marker: marker.to_string(),
        }
    }

    /// Render a cycle day, prefixed with the marker when approximate.
    pub fn format_day(&self, day: u32) -> String {
        if self.approximate {
            format!("{}{}", self.marker, day)
        } else {
            day.to_string()
        }
    }
}
