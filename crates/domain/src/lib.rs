//! Ferrous ARP Watch Domain Layer
pub mod config;
pub mod errors;
pub mod mac_address;
pub mod monitor_event;
pub mod monitor_state;
pub mod platform;
pub mod resolution;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use mac_address::MacAddress;
pub use monitor_event::{MonitorEvent, Severity};
pub use monitor_state::{MonitorState, MonitorStatus};
pub use platform::Platform;
pub use resolution::ResolutionResult;
