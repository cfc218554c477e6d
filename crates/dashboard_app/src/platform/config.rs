use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use dashboard_client::ApiSettings;
use dashboard_logging::{dash_info, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::persistence::{AtomicFileWriter, PersistError};

pub(crate) const DEFAULT_CONFIG_PATH: &str = ".dashboard.ron";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DashboardConfig {
    pub base_url: String,
    pub table_source: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Periodic table reload; 0 turns it off.
    pub refresh_interval_secs: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            table_source: api.table_source,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            refresh_interval_secs: 300,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Reads the config at `path`; a missing file yields the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn save(&self, path: &Path) -> Result<PathBuf, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(self, pretty)?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_CONFIG_PATH);
        let written = AtomicFileWriter::beside(path).write(filename, &content)?;
        dash_info!("Wrote config to {:?}", written);
        Ok(written)
    }

    pub(crate) fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            table_source: self.table_source.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub(crate) fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    pub(crate) fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
