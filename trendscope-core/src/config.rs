//! Analysis configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Command-line flags override values after loading.

use crate::indicators::MacdParams;
use crate::relative_strength::{DEFAULT_LOOKBACK, LOOKBACK_RANGE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub macd: MacdConfig,
    pub relative_strength: RsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    /// Years of daily history fetched; quarterly MACD needs roughly nine.
    pub history_years: u32,
}

impl Default for MacdConfig {
    fn default() -> Self {
        let params = MacdParams::default();
        Self {
            fast: params.fast,
            slow: params.slow,
            signal: params.signal,
            history_years: 17,
        }
    }
}

impl MacdConfig {
    pub fn params(&self) -> MacdParams {
        MacdParams {
            fast: self.fast,
            slow: self.slow,
            signal: self.signal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsConfig {
    pub lookback_days: usize,
    /// Calendar days fetched before the requested start to warm up the ratios.
    pub warmup_days: u32,
}

impl Default for RsConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK,
            warmup_days: 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Rows of the relative-strength table shown on the console.
    pub tail_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
            tail_rows: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.macd;
        if m.fast == 0 || m.slow == 0 || m.signal == 0 {
            return Err(ConfigError::Invalid("MACD periods must be >= 1".into()));
        }
        if m.fast >= m.slow {
            return Err(ConfigError::Invalid(format!(
                "MACD fast period ({}) must be shorter than slow period ({})",
                m.fast, m.slow
            )));
        }
        if m.history_years == 0 {
            return Err(ConfigError::Invalid("history_years must be >= 1".into()));
        }
        let lookback = self.relative_strength.lookback_days;
        if !LOOKBACK_RANGE.contains(&lookback) {
            return Err(ConfigError::Invalid(format!(
                "lookback_days ({lookback}) must be within {}..={}",
                LOOKBACK_RANGE.start(),
                LOOKBACK_RANGE.end()
            )));
        }
        Ok(())
    }
}
