//! Engine configuration
//!
//! Precedence (lowest to highest):
//! 1. Programmatic defaults
//! 2. YAML file (`aqariy.yaml`, or an explicit path)
//! 3. Environment variables (`AQARIY_` prefix, `__` for nesting,
//!    e.g. `AQARIY_SCORING__BASE_URL`)
//!
//! CLI flags are applied on top by the binary.

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::core::JudgeBands;
use crate::error::ConfigError;
use crate::types::Locale;
use crate::{DEFAULT_JUDGE_PATH, DEFAULT_PREDICT_PATH, DEFAULT_SCORING_TIMEOUT_MS};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "aqariy.yaml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "AQARIY_";

/// Optional engine capabilities. One engine covers both the form variant
/// with an elevator field and judgment, and the plainer one without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineProfile {
    /// Collect and price the elevator flag
    pub elevator: bool,
    /// Expose listed-price judgment
    pub judgment: bool,
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self {
            elevator: true,
            judgment: true,
        }
    }
}

/// Remote scoring collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// e.g. `http://localhost:8000`; no remote scoring when absent
    pub base_url: Option<String>,
    pub predict_path: String,
    /// Judgment endpoint; set to `None` to judge locally
    pub judge_path: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            predict_path: DEFAULT_PREDICT_PATH.to_string(),
            judge_path: Some(DEFAULT_JUDGE_PATH.to_string()),
            timeout_ms: DEFAULT_SCORING_TIMEOUT_MS,
        }
    }
}

impl ScoringConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// trace / debug / info / warn / error; RUST_LOG takes precedence
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub bands: JudgeBands,
    pub profile: EngineProfile,
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub locale: Locale,
}

impl EngineConfig {
    /// Load defaults, `aqariy.yaml` if present, then the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load defaults, the given YAML file if present, then the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: EngineConfig = Figment::new()
            .merge(Serialized::defaults(EngineConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands.validate()?;
        if self.scoring.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if let Some(url) = &self.scoring.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidBaseUrl(url.clone()));
            }
        }
        Ok(())
    }
}
