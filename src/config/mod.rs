use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::scoring::ScoringConfig;

/// Get the config directory path (~/.config/peergrade/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("peergrade")
}

/// Get the default config file path (~/.config/peergrade/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load the scoring policy from a YAML file.
///
/// With no explicit path, the default location is used if it exists and the
/// built-in policy otherwise. An explicitly given path must exist.
pub fn load_config(path: Option<PathBuf>) -> Result<ScoringConfig> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            explicit
        }
        None => {
            let default_path = get_config_path();
            if !default_path.exists() {
                return Ok(ScoringConfig::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: ScoringConfig = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}
