use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid MAC address: {0}")]
    InvalidMacAddress(String),

    #[error("Resolution failed: {0}")]
    ResolutionFailure(String),

    #[error("No gateway specified and auto-detect not enabled or failed")]
    NoGatewayAddress,

    #[error("Could not resolve MAC for gateway {0}")]
    GatewayMacUnresolved(Ipv4Addr),

    #[error("Active ARP transport unavailable: {0}")]
    TransportUnavailable(String),

    #[error("Command '{program}' failed: {reason}")]
    CommandExecutionFailure { program: String, reason: String },

    #[error("Command '{program}' timed out after {timeout_ms}ms")]
    CommandTimeout { program: String, timeout_ms: u64 },

    #[error("I/O error: {0}")]
    IoError(String),
}
