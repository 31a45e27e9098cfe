//! Configuration loading for the agentdesk TUI.
//!
//! Every field except `profiles` is required. Profiles default to the
//! built-in backend URLs per environment.

use agentdesk_client::HttpConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const CONFIG_ENV: &str = "AGENTDESK_CONFIG";
pub const ENVIRONMENT_ENV: &str = "AGENTDESK_ENV";
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidValue {
                field: "environment",
                reason: format!("unknown environment '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub api_base_url: String,
}

/// Backend profiles keyed by environment name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Profiles(BTreeMap<String, ProfileConfig>);

impl Profiles {
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        for (env, url) in [
            (Environment::Development, "http://localhost:8000"),
            (Environment::Test, "http://test-api.example.com"),
            (Environment::Production, "https://api.example.com"),
        ] {
            profiles.insert(
                env.as_str().to_string(),
                ProfileConfig {
                    api_base_url: url.to_string(),
                },
            );
        }
        Profiles(profiles)
    }

    pub fn get(&self, environment: Environment) -> Option<&ProfileConfig> {
        self.0.get(environment.as_str())
    }
}

impl Default for Profiles {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub environment: Environment,
    #[serde(default)]
    pub profiles: Profiles,
    pub request_timeout_ms: u64,
    pub refresh_interval_ms: u64,
    /// Durable token storage.
    pub session_path: PathBuf,
    /// Lightweight UI state (active view, page sizes).
    pub persistence_path: PathBuf,
    pub log_path: PathBuf,
    pub default_page_size: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or AGENTDESK_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let override_env = std::env::var(ENVIRONMENT_ENV).ok();
        let config = Self::from_path(&path)?.with_environment_override(override_env.as_deref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// `AGENTDESK_ENV` wins over the file's `environment`.
    pub fn with_environment_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            self.environment = value.parse()?;
        }
        Ok(self)
    }

    pub fn api_base_url(&self) -> Result<&str, ConfigError> {
        self.profiles
            .get(self.environment)
            .map(|profile| profile.api_base_url.as_str())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "profiles",
                reason: format!("no profile for environment '{}'", self.environment),
            })
    }

    pub fn http_config(&self) -> Result<HttpConfig, ConfigError> {
        Ok(HttpConfig::new(self.api_base_url()?)
            .with_timeout(Duration::from_millis(self.request_timeout_ms)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url()?;
        if url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "profiles.api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "profiles.api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.default_page_size == 0 || self.default_page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "default_page_size",
                reason: format!("must be between 1 and {}", MAX_PAGE_SIZE),
            });
        }
        if self.session_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "session_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.persistence_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "persistence_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
