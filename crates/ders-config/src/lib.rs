use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::audit::AuditConfig;
use self::content::ContentConfig;
use self::logging::LoggingConfig;

pub mod audit;
pub mod content;
pub mod logging;

/// Separator for `DERS_CONTENT_PATHS`
const PATH_LIST_SEPARATOR: char = ':';

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub content: ContentConfig,
    pub audit: AuditConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Read a JSON config file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(filter) = env::var("DERS_LOG") {
            self.logging.filter = filter;
        }

        if let Some(json) = env::var("DERS_LOG_JSON").ok().and_then(|v| parse_flag(&v)) {
            self.logging.json = json;
        }

        if let Ok(paths) = env::var("DERS_CONTENT_PATHS") {
            self.content.additional_paths.extend(
                paths
                    .split(PATH_LIST_SEPARATOR)
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from),
            );
        }

        if let Some(count) = env::var("DERS_EXPECTED_PRACTICE")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.audit.expected_practice_count = count;
        }

        if let Some(count) = env::var("DERS_EXPECTED_LISTENING")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.audit.expected_listening_count = count;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
