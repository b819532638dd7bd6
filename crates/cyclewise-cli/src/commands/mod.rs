pub mod analyze;
pub mod config;
pub mod days;
pub mod predict;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use cyclewise_core::observation::DATE_FORMAT;
use cyclewise_core::{load_observations, CoreError, DailyObservation, EngineConfig};
use tracing::warn;

/// Arguments shared by every command that reads a log.
#[derive(Args)]
pub struct InputArgs {
    /// JSON file holding an array of daily observations
    #[arg(long, short)]
    pub input: PathBuf,
    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub today: Option<String>,
}

impl InputArgs {
    /// Load and normalize the observation log, warning about invalid records.
    pub fn load(&self) -> Result<Vec<DailyObservation>, Box<dyn std::error::Error>> {
        let observations = load_observations(&self.input)?;
        for obs in &observations {
            if let Err(e) = obs.validate() {
                warn!(date = %obs.date, "{e}");
            }
        }
        Ok(observations)
    }

    pub fn reference_date(&self) -> Result<NaiveDate, CoreError> {
        match self.today.as_deref() {
            Some(raw) => parse_reference_date(raw),
            None => Ok(Local::now().date_naive()),
        }
    }
}

fn parse_reference_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| CoreError::Custom(format!("invalid --today '{raw}': {e}")))
}

/// Stored config, falling back to defaults with a warning.
pub fn load_config() -> EngineConfig {
    EngineConfig::load().unwrap_or_else(|e| {
        warn!("using default configuration: {e}");
        EngineConfig::default()
    })
}
