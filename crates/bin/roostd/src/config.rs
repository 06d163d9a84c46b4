//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `roostd.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use roost_app::controller::CoopSettings;
use roost_domain::condition::{ConditionMode, ConditionSpec};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Coop location, mode and schedule.
    pub coop: CoopConfig,
    /// Simulated door settings.
    pub door: DoorConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Coop controller configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CoopConfig {
    /// Degrees north; zero falls back to the built-in default location.
    pub latitude: f64,
    /// Degrees east; zero falls back to the built-in default location.
    pub longitude: f64,
    /// Whether the scheduler owns the door from the start.
    pub automatic: bool,
    /// Opening condition (mode + value).
    pub opening: ConditionSpec,
    /// Closing condition (mode + value).
    pub closing: ConditionSpec,
}

/// Simulated door configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Simulated opening travel, seconds.
    pub opening_duration_secs: u64,
    /// Simulated closing travel, seconds.
    pub closing_duration_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `roostd.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("roostd.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ROOSTD_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("ROOSTD_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl CoopConfig {
    /// Translate into the controller's settings shape.
    #[must_use]
    pub fn settings(&self) -> CoopSettings {
        CoopSettings {
            latitude: self.latitude,
            longitude: self.longitude,
            automatic: self.automatic,
            opening: self.opening.clone(),
            closing: self.closing.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for CoopConfig {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            automatic: true,
            opening: ConditionSpec {
                mode: ConditionMode::SunBased,
                value: "-00:10".to_string(),
            },
            closing: ConditionSpec {
                mode: ConditionMode::SunBased,
                value: "+00:10".to_string(),
            },
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roostd=info,roost=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.coop.automatic);
        assert_eq!(config.coop.opening.mode, ConditionMode::SunBased);
        assert_eq!(config.coop.opening.value, "-00:10");
        assert_eq!(config.coop.closing.value, "+00:10");
        assert_eq!(config.door.opening_duration_secs, 0);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.coop.automatic);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [coop]
            latitude = 48.85
            longitude = 2.35
            automatic = false
            opening = { mode = 'time_based', value = '07:30' }
            closing = { mode = 'sun_based', value = '+00:30' }

            [door]
            opening_duration_secs = 20
            closing_duration_secs = 15

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert!((config.coop.latitude - 48.85).abs() < f64::EPSILON);
        assert!(!config.coop.automatic);
        assert_eq!(config.coop.opening.mode, ConditionMode::TimeBased);
        assert_eq!(config.coop.opening.value, "07:30");
        assert_eq!(config.door.opening_duration_secs, 20);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [coop]
            automatic = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.coop.automatic);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.coop.opening.mode, ConditionMode::SunBased);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_translate_coop_section_into_settings() {
        let config = Config::default();
        let settings = config.coop.settings();
        assert!(settings.automatic);
        assert_eq!(settings.opening.value, "-00:10");
        assert_eq!(settings.closing.value, "+00:10");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
