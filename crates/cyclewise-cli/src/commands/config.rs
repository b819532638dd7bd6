//! Configuration commands.

use clap::Subcommand;
use cyclewise_core::{ConfigError, CoreError, EngineConfig};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value (e.g. "inference.use_mucus_method", "prediction.max_cycles")
    Get { key: String },
    /// Change one value and save the file
    Set { key: String, value: String },
    /// Print the whole configuration as JSON
    List,
    /// Overwrite the configuration with defaults
    Reset,
}

fn lookup(config: &EngineConfig, key: &str) -> Result<String, CoreError> {
    config
        .get(key)
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()).into())
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let output = match action {
        ConfigAction::Get { key } => lookup(&EngineConfig::load()?, &key)?,
        ConfigAction::Set { key, value } => {
            let mut config = EngineConfig::load()?;
            config.set(&key, &value)?;
            config.save()?;
            format!("{key} = {}", lookup(&config, &key)?)
        }
        ConfigAction::List => serde_json::to_string_pretty(&EngineConfig::load()?)?,
        ConfigAction::Reset => {
            EngineConfig::default().save()?;
            "config reset to defaults".to_string()
        }
    };
    println!("{output}");
    Ok(())
}
