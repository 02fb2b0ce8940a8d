use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::aggregate::DEFAULT_TOP_N;
use crate::data::loader::{LoadOptions, TextEncoding};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "CRIME_DASHBOARD_CONFIG";
/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("delimiter '{0}' must be a single ASCII character")]
    InvalidDelimiter(char),
    #[error("top_n must be at least 1")]
    InvalidTopN,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Chart colours as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub emphasis: String,
    pub muted: String,
    pub background: String,
    pub text: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            emphasis: "#a61929".to_string(),
            muted: "#f4c6cc".to_string(),
            background: "#d6b8bc".to_string(),
            text: "#40010D".to_string(),
        }
    }
}

/// Runtime settings.  Every field has a default so an empty `{}` is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub encoding: TextEncoding,
    pub delimiter: char,
    pub top_n: usize,
    pub theme: ThemeConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("estataldelitos.csv"),
            encoding: TextEncoding::Latin1,
            delimiter: ',',
            top_n: DEFAULT_TOP_N,
            theme: ThemeConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = serde_json::from_str(text)?;
        if config.top_n == 0 {
            return Err(ConfigError::InvalidTopN);
        }
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Resolve the configuration: `$CRIME_DASHBOARD_CONFIG`, then
    /// `./dashboard.json`, then defaults.  A broken file is logged and skipped.
    pub fn discover() -> Self {
        let candidate = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            });

        let Some(path) = candidate else {
            log::info!("No configuration file, using defaults");
            return Self::default();
        };

        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration: {e:#}");
                Self::default()
            }
        }
    }

    /// Loader settings derived from this configuration.
    pub fn load_options(&self) -> Result<LoadOptions, ConfigError> {
        let delimiter =
            u8::try_from(self.delimiter).map_err(|_| ConfigError::InvalidDelimiter(self.delimiter))?;
        if !delimiter.is_ascii() {
            return Err(ConfigError::InvalidDelimiter(self.delimiter));
        }
        Ok(LoadOptions {
            encoding: self.encoding,
            delimiter,
        })
    }
}
