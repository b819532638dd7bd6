//! Daily observation records.
//!
//! A [`DailyObservation`] is everything the user logged for one calendar day.
//! Records are created or replaced wholesale when a day is saved; the engine
//! only ever reads them.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Symptom key for fatigue.
pub const SYMPTOM_FATIGUE: &str = "fatigue";
/// Symptom key for bloating.
pub const SYMPTOM_BLOATING: &str = "bloating";
/// Symptom key for pelvic pain.
pub const SYMPTOM_PELVIC_PAIN: &str = "pelvic_pain";

/// Sensation at the vulva when checking cervical mucus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MucusObservation {
    Dry,
    Moist,
    Wet,
    Slippery,
}

/// Visual appearance of cervical mucus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MucusAppearance {
    None,
    Sticky,
    Creamy,
    EggWhite,
}

/// Side on which mid-cycle (mittelschmerz) pain was felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvulationPainSide {
    Left,
    Right,
    Both,
}

/// Pain recorded for one body region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainRegion {
    pub region_id: String,
    /// Intensity (0-10)
    pub intensity: f64,
    #[serde(default)]
    pub qualities: BTreeSet<String>,
}

/// A single acute pain episode logged during the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainEvent {
    /// Intensity (0-10)
    pub intensity: f64,
    #[serde(default)]
    pub region_id: Option<String>,
    /// Free-form time of day, e.g. "14:30"
    #[serde(default)]
    pub time: Option<String>,
}

/// Presence and severity of one tracked symptom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub present: bool,
    /// Severity (0-10), when the user rated it
    #[serde(default)]
    pub score: Option<f64>,
}

/// Everything logged for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Calendar day as `YYYY-MM-DD`; unique across the list.
    pub date: String,
    #[serde(default)]
    pub bleeding_active: bool,
    /// Pictorial blood-loss assessment chart score
    #[serde(default)]
    pub pbac_score: Option<f64>,
    #[serde(default)]
    pub pain_regions: Vec<PainRegion>,
    #[serde(default)]
    pub pain_events: Vec<PainEvent>,
    #[serde(default)]
    pub overall_pain_intensity: Option<f64>,
    #[serde(default)]
    pub impact_intensity: Option<f64>,
    #[serde(default)]
    pub mucus_observation: Option<MucusObservation>,
    #[serde(default)]
    pub mucus_appearance: Option<MucusAppearance>,
    #[serde(default)]
    pub ovulation_pain_intensity: Option<f64>,
    #[serde(default)]
    pub ovulation_pain_side: Option<OvulationPainSide>,
    #[serde(default)]
    pub hormone_test_positive: Option<bool>,
    #[serde(default)]
    pub symptoms: BTreeMap<String, SymptomEntry>,
}

impl DailyObservation {
    /// Create an empty observation for `date`.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            bleeding_active: false,
            pbac_score: None,
            pain_regions: Vec::new(),
            pain_events: Vec::new(),
            overall_pain_intensity: None,
            impact_intensity: None,
            mucus_observation: None,
            mucus_appearance: None,
            ovulation_pain_intensity: None,
            ovulation_pain_side: None,
            hormone_test_positive: None,
            symptoms: BTreeMap::new(),
        }
    }

    /// Parse the date field. `None` for anything that is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Highest pain level that shows up on the pain chart for this day.
    ///
    /// Takes the general pain score, every per-region score and every acute
    /// pain event into account. Ovulation pain is deliberately not included.
    pub fn visible_pain_level(&self) -> f64 {
        let regions = self.pain_regions.iter().map(|r| r.intensity);
        let events = self.pain_events.iter().map(|e| e.intensity);
        self.overall_pain_intensity
            .into_iter()
            .chain(regions)
            .chain(events)
            .fold(0.0, f64::max)
    }

    /// Whether any cervical mucus field was filled in.
    pub fn has_mucus_data(&self) -> bool {
        self.mucus_observation.is_some() || self.mucus_appearance.is_some()
    }

    /// Normalized (0.0-1.0) score of a symptom, 0 when absent or unrated.
    pub fn symptom_score(&self, key: &str) -> f64 {
        match self.symptoms.get(key) {
            Some(entry) if entry.present => entry.score.unwrap_or(0.0) / 10.0,
            _ => 0.0,
        }
    }

    /// Check numeric fields against their documented ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.parsed_date().is_none() {
            return Err(ValidationError::InvalidDate {
                field: "date".into(),
                value: self.date.clone(),
            });
        }

        check_intensity("overall_pain_intensity", self.overall_pain_intensity)?;
        check_intensity("impact_intensity", self.impact_intensity)?;
        check_intensity("ovulation_pain_intensity", self.ovulation_pain_intensity)?;
        for region in &self.pain_regions {
            check_intensity(&format!("pain_regions.{}", region.region_id), Some(region.intensity))?;
        }
        for event in &self.pain_events {
            check_intensity("pain_events.intensity", Some(event.intensity))?;
        }
        for (key, entry) in &self.symptoms {
            check_intensity(&format!("symptoms.{key}"), entry.score)?;
        }
        Ok(())
    }
}

fn check_intensity(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(0.0..=10.0).contains(&v) => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: v,
            min: 0.0,
            max: 10.0,
        }),
        _ => Ok(()),
    }
}

/// Sort observations by date and collapse duplicate dates.
///
/// When a date appears more than once the last record wins, matching how a
/// saved day replaces the previous one.
pub fn normalize_observations(mut observations: Vec<DailyObservation>) -> Vec<DailyObservation> {
    // Stable sort keeps input order among equal dates, so the later record
    // is the one that survives dedup below.
    observations.sort_by(|a, b| a.date.trim().cmp(b.date.trim()));

    let mut result: Vec<DailyObservation> = Vec::with_capacity(observations.len());
    for obs in observations {
        match result.last_mut() {
            Some(last) if last.date.trim() == obs.date.trim() => *last = obs,
            _ => result.push(obs),
        }
    }
    result
}

/// Load a JSON array of observations from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid JSON array
/// of observations. Out-of-range values are not rejected here; call
/// [`DailyObservation::validate`] for that.
pub fn load_observations(path: &Path) -> Result<Vec<DailyObservation>> {
    let content = std::fs::read_to_string(path)?;
    let observations: Vec<DailyObservation> = serde_json::from_str(&content)?;
    Ok(normalize_observations(observations))
}
