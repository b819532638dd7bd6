//! Ovulation inference.
//!
//! This module provides:
//! - The resolver that fuses a cycle's signals into one estimate
//! - The personal luteal-phase estimator and its two-pass bootstrap
//! - Fertile window arithmetic

mod bootstrap;
mod fertile_window;
mod luteal;
mod resolver;

pub use bootstrap::{
    bootstrap_ovulation_estimates, has_sufficient_mucus_history, resolution_length,
    BootstrapOptions, BootstrapResult, MIN_MUCUS_HISTORY_CYCLES,
};
pub use fertile_window::{
    calculate_fertile_window, is_fertile_day, FertileWindow, EGG_VIABILITY_DAYS,
    SPERM_VIABILITY_DAYS,
};
pub use luteal::{
    calculate_personal_luteal_phase, MAX_LUTEAL_PHASE, MIN_LUTEAL_PHASE,
    MIN_QUALIFYING_CONFIDENCE, MIN_QUALIFYING_CYCLES,
};
pub use resolver::{
    resolve_ovulation, OvulationEstimate, OvulationMethod, ResolveContext,
    AGREEMENT_TOLERANCE_DAYS, HORMONE_TEST_CONFIDENCE, LOW_CONFIDENCE_THRESHOLD,
};
