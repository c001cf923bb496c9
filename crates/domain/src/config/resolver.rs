use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Send live ARP requests before falling back to the OS cache.
    #[serde(default = "default_true")]
    pub active_enabled: bool,

    /// Interface for active queries; picked from the target subnet when unset.
    #[serde(default)]
    pub interface: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra ARP requests after the first goes unanswered, 0 or 1.
    #[serde(default = "default_active_retries")]
    pub active_retries: u32,

    /// Upper bound for every OS introspection command.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            active_enabled: default_true(),
            interface: None,
            timeout_ms: default_timeout_ms(),
            active_retries: default_active_retries(),
            command_timeout_ms: default_command_timeout_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_active_retries() -> u32 {
    1
}

fn default_command_timeout_ms() -> u64 {
    3000
}
