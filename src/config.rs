//! Configuration management for quotagate.
//!
//! Rates are usually hard-coded with [`Rate`](crate::ratelimit::Rate)
//! constructors, but deployments that tune quotas per environment can load
//! them from a YAML file instead:
//!
//! ```yaml
//! store:
//!   redis_url: redis://cache.internal/
//!   key_prefix: "rateLimit:"
//! gates:
//!   login:
//!     quota: 5
//!     unit: minute
//!   api:
//!     quota: 1000
//!     units: 15
//!     unit: minute
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::{QuotagateError, Result};
use crate::ratelimit::Rate;

/// Main configuration for quotagate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotagateConfig {
    /// Counter store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Named gate policies
    #[serde(default)]
    pub gates: HashMap<String, GateConfig>,
}

/// Counter store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Namespace prefix for counter keys
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_redis_url() -> String {
    "redis://127.0.0.1/".to_string()
}

fn default_key_prefix() -> String {
    "rateLimit:".to_string()
}

/// Policy configuration for a single gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Maximum operations per window
    pub quota: u64,

    /// The time unit of the window
    pub unit: TimeUnit,

    /// Number of units making up the window (e.g. `units: 15` with
    /// `unit: minute` for a quarter-hour window)
    #[serde(default = "default_units")]
    pub units: u64,
}

fn default_units() -> u64 {
    1
}

/// Time unit for gate windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    /// Get the length of this unit in seconds.
    pub fn seconds(&self) -> u64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3600,
            TimeUnit::Day => 86400,
        }
    }
}

impl GateConfig {
    /// Convert this gate configuration into a rate policy.
    ///
    /// Carries the same validation as the `Rate` constructors: a zero
    /// quota or a zero `units` value is a configuration error.
    pub fn rate(&self) -> Result<Rate> {
        Rate::new(self.units * self.unit.seconds(), self.quota)
    }
}

impl QuotagateConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading rate limit configuration");

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| QuotagateError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the rate policy for a named gate.
    pub fn gate_rate(&self, name: &str) -> Result<Rate> {
        let gate = self
            .gates
            .get(name)
            .ok_or_else(|| QuotagateError::Config(format!("No gate named '{}'", name)))?;
        gate.rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
store:
  redis_url: redis://cache.internal/
gates:
  login:
    quota: 5
    unit: minute
  api:
    quota: 1000
    units: 15
    unit: minute
"#;
        let config = QuotagateConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.store.redis_url, "redis://cache.internal/");
        assert_eq!(config.store.key_prefix, "rateLimit:");
        assert_eq!(config.gates.len(), 2);

        let login = config.gate_rate("login").unwrap();
        assert_eq!(login.interval(), 60);
        assert_eq!(login.quota(), 5);

        let api = config.gate_rate("api").unwrap();
        assert_eq!(api.interval(), 900);
        assert_eq!(api.quota(), 1000);
    }

    #[test]
    fn test_defaults() {
        let config = QuotagateConfig::from_yaml("{}").unwrap();

        assert_eq!(config.store.redis_url, "redis://127.0.0.1/");
        assert_eq!(config.store.key_prefix, "rateLimit:");
        assert!(config.gates.is_empty());
    }

    #[test]
    fn test_zero_quota_is_rejected() {
        let yaml = r#"
gates:
  login:
    quota: 0
    unit: minute
"#;
        let config = QuotagateConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.gate_rate("login"),
            Err(QuotagateError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_gate_is_an_error() {
        let config = QuotagateConfig::from_yaml("{}").unwrap();
        assert!(config.gate_rate("missing").is_err());
    }

    #[test]
    fn test_invalid_yaml_is_a_config_error() {
        assert!(matches!(
            QuotagateConfig::from_yaml("gates: ["),
            Err(QuotagateError::Config(_))
        ));
    }

    #[test]
    fn test_time_unit_seconds() {
        assert_eq!(TimeUnit::Second.seconds(), 1);
        assert_eq!(TimeUnit::Minute.seconds(), 60);
        assert_eq!(TimeUnit::Hour.seconds(), 3600);
        assert_eq!(TimeUnit::Day.seconds(), 86400);
    }
}
