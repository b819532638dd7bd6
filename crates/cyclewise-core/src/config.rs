//! TOML-based engine configuration.
//!
//! Stores user preferences including:
//! - Whether cervical mucus observations feed ovulation inference
//! - How many past cycles predictions average over
//! - How approximate values are marked in output
//!
//! Configuration is stored at `~/.config/cyclewise/config.toml`. The engine
//! never reads it directly; callers turn it into [`AnalysisOptions`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::pipeline::AnalysisOptions;
use crate::prediction::{PredictionOptions, DEFAULT_UNCERTAINTY_MARKER, MIN_CYCLES_FOR_CERTAINTY};
use crate::stats::{DEFAULT_CYCLE_LENGTH, DEFAULT_MAX_CYCLES};

/// Returns `~/.config/cyclewise[-dev]/` based on CYCLEWISE_ENV.
///
/// Set CYCLEWISE_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CYCLEWISE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cyclewise-dev")
    } else {
        base_dir.join("cyclewise")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Inference configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_true")]
    pub use_mucus_method: bool,
}

/// Cross-cycle prediction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u32,
    #[serde(default = "default_cycle_length")]
    pub default_cycle_length: u32,
    #[serde(default = "default_min_cycles_for_certainty")]
    pub min_cycles_for_certainty: u32,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_uncertainty_marker")]
    pub uncertainty_marker: String,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/cyclewise/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_true() -> bool {
    true
}
fn default_max_cycles() -> u32 {
    DEFAULT_MAX_CYCLES as u32
}
fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}
fn default_min_cycles_for_certainty() -> u32 {
    MIN_CYCLES_FOR_CERTAINTY as u32
}
fn default_uncertainty_marker() -> String {
    DEFAULT_UNCERTAINTY_MARKER.into()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            use_mucus_method: true,
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
            default_cycle_length: default_cycle_length(),
            min_cycles_for_certainty: default_min_cycles_for_certainty(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            uncertainty_marker: default_uncertainty_marker(),
        }
    }
}

impl EngineConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot assign to a section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: EngineConfig = toml::from_str(&content).map_err(ConfigError::from)?;
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not match
    /// the type of the current value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Build pipeline options for an analysis run on `today`.
    pub fn analysis_options(&self, today: NaiveDate) -> AnalysisOptions {
        AnalysisOptions {
            use_mucus_method: self.inference.use_mucus_method,
            today,
            prediction: PredictionOptions {
                max_cycles: self.prediction.max_cycles.max(1) as usize,
                default_cycle_length: self.prediction.default_cycle_length,
                min_cycles_for_certainty: self.prediction.min_cycles_for_certainty as usize,
                uncertainty_marker: self.display.uncertainty_marker.clone(),
            },
        }
    }
}
