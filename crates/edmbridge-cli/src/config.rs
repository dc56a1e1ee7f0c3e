use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use edmbridge_graphql::SdlConfig;
use edmbridge_mediation::MediationConfig;
use serde::{Deserialize, Serialize};

/// Contents of `edmbridge.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mediation: MediationConfig,
    #[serde(default)]
    pub graphql: SdlConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.mediation.validate()?;
        self.graphql.validate()?;
        Ok(())
    }
}

/// Loads the configuration file, or defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            parse(&content).with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => AppConfig::default(),
    };
    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

fn parse(content: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    Ok(config)
}
