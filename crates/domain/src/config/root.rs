use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::monitor::MonitorConfig;
use super::resolver::ResolverConfig;
use crate::mac_address::MacAddress;

const LOCAL_CONFIG_PATH: &str = "ferrous-arpwatch.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-arpwatch/config.toml";

/// Main configuration structure for Ferrous ARP Watch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Gateway selection, poll interval and pinned MAC
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Resolution strategies and their timeouts
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Event log and diagnostics
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-arpwatch.toml in current directory
    /// 3. /etc/ferrous-arpwatch/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(gateway) = overrides.gateway {
            self.monitor.gateway = Some(gateway);
        }
        if let Some(interval) = overrides.interval_secs {
            self.monitor.interval_secs = interval;
        }
        if let Some(expect) = overrides.expect {
            self.monitor.expect = Some(expect);
        }
        if overrides.auto_detect {
            self.monitor.auto_detect = true;
        }
        if let Some(interface) = overrides.interface {
            self.resolver.interface = Some(interface);
        }
        if overrides.passive_only {
            self.resolver.active_enabled = false;
        }
        if let Some(file) = overrides.log_file {
            self.logging.file = Some(file);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Interval must be a positive number of seconds".to_string(),
            ));
        }

        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeout cannot be 0".to_string(),
            ));
        }

        if self.resolver.active_retries > 1 {
            return Err(ConfigError::Validation(format!(
                "active_retries is {} but at most one ARP retry is allowed",
                self.resolver.active_retries
            )));
        }

        if self.resolver.command_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Command timeout cannot be 0".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "Unknown log format '{}' (expected text or json)",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub gateway: Option<Ipv4Addr>,
    pub interval_secs: Option<u64>,
    pub expect: Option<MacAddress>,
    pub auto_detect: bool,
    pub interface: Option<String>,
    pub passive_only: bool,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}
