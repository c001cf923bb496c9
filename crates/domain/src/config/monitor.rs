use crate::mac_address::MacAddress;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub gateway: Option<Ipv4Addr>,

    /// Seconds between two checks of the gateway binding.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Pinned gateway MAC; any other observation is an alert.
    #[serde(default)]
    pub expect: Option<MacAddress>,

    #[serde(default)]
    pub auto_detect: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            gateway: None,
            interval_secs: default_interval_secs(),
            expect: None,
            auto_detect: false,
        }
    }
}

fn default_interval_secs() -> u64 {
    5
}
