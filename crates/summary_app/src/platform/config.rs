use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use summary_core::{DEFAULT_ENDPOINT, DEFAULT_INPUT_URL};
use summary_engine::FetchSettings;
use widget_logging::LogDestination;

use super::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "./website_summary.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogSetting {
    File,
    #[default]
    Terminal,
    Both,
}

impl From<LogSetting> for LogDestination {
    fn from(setting: LogSetting) -> Self {
        match setting {
            LogSetting::File => LogDestination::File,
            LogSetting::Terminal => LogDestination::Terminal,
            LogSetting::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub origin: Option<String>,
    pub default_url: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub log: LogSetting,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            origin: None,
            default_url: DEFAULT_INPUT_URL.to_string(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            max_response_bytes: FetchSettings::default().max_bytes,
            log: LogSetting::default(),
        }
    }
}

impl AppConfig {
    /// Command line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(origin) = &cli.origin {
            self.origin = Some(origin.clone());
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            origin: self.origin.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn to_ron(&self) -> anyhow::Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .context("failed to serialize configuration")
    }
}

/// Reads the configuration file. `Ok(None)` means the file does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<Option<AppConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {:?}", path));
        }
    };

    let config = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {:?}", path))?;
    Ok(Some(config))
}
