use async_trait::async_trait;
use ferrous_arpwatch_application::ports::GatewayLocator;
use ferrous_arpwatch_domain::{DomainError, Platform};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use super::command::CommandRunner;

const RTF_GATEWAY: u32 = 0x0002;

const WINDOWS_GATEWAY_QUERY: &str = "(Get-NetIPConfiguration | Where-Object { $_.IPv4DefaultGateway } | Select-Object -First 1).IPv4DefaultGateway.NextHop";

/// Finds the default IPv4 gateway from the kernel routing table.
pub struct SystemGatewayLocator {
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    route_table_path: PathBuf,
}

impl SystemGatewayLocator {
    pub fn new(platform: Platform, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            platform,
            runner,
            route_table_path: PathBuf::from("/proc/net/route"),
        }
    }

    pub fn with_route_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.route_table_path = path.into();
        self
    }

    async fn detect_linux(&self) -> Result<Option<Ipv4Addr>, DomainError> {
        match self.runner.run("ip", &["route", "show", "default"]).await {
            Ok(out) => {
                if let Some(ip) = parse_ip_route_default(&out) {
                    return Ok(Some(ip));
                }
            }
            Err(e) => debug!(error = %e, "ip route failed, reading route table"),
        }

        let table = tokio::fs::read_to_string(&self.route_table_path)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to read route table: {}", e)))?;
        Ok(parse_proc_net_route(&table))
    }

    async fn detect_macos(&self) -> Result<Option<Ipv4Addr>, DomainError> {
        let out = self
            .runner
            .run("/usr/sbin/route", &["-n", "get", "default"])
            .await?;
        Ok(parse_route_get_default(&out))
    }

    async fn detect_windows(&self) -> Result<Option<Ipv4Addr>, DomainError> {
        let out = self
            .runner
            .run(
                "powershell",
                &["-NoProfile", "-Command", WINDOWS_GATEWAY_QUERY],
            )
            .await?;
        Ok(out
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .and_then(|line| line.parse().ok()))
    }
}

#[async_trait]
impl GatewayLocator for SystemGatewayLocator {
    async fn detect_default_gateway(&self) -> Option<Ipv4Addr> {
        let result = match self.platform {
            Platform::Linux => self.detect_linux().await,
            Platform::MacOs => self.detect_macos().await,
            Platform::Windows => self.detect_windows().await,
            Platform::Unsupported => Ok(None),
        };

        match result {
            Ok(Some(ip)) => {
                debug!(gateway = %ip, platform = %self.platform, "Default gateway detected");
                Some(ip)
            }
            Ok(None) => {
                debug!(platform = %self.platform, "No default gateway found");
                None
            }
            Err(e) => {
                debug!(platform = %self.platform, error = %e, "Default gateway detection failed");
                None
            }
        }
    }
}

// Example: "default via 192.168.1.1 dev wlan0 proto dhcp metric 600"
fn parse_ip_route_default(output: &str) -> Option<Ipv4Addr> {
    output
        .lines()
        .filter(|line| line.starts_with("default"))
        .find_map(|line| {
            let mut tokens = line.split_whitespace();
            tokens.find(|t| *t == "via")?;
            tokens.next()?.parse().ok()
        })
}

// Iface  Destination  Gateway   Flags  RefCnt  Use  Metric  Mask ...
// eth0   00000000     0101A8C0  0003   0       0    100     00000000
fn parse_proc_net_route(table: &str) -> Option<Ipv4Addr> {
    table.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 || fields[1] != "00000000" {
            return None;
        }
        let flags = u32::from_str_radix(fields[3], 16).ok()?;
        if flags & RTF_GATEWAY == 0 {
            return None;
        }
        // Printed as a host-endian word holding network-order bytes.
        let raw = u32::from_str_radix(fields[2], 16).ok()?;
        Some(Ipv4Addr::from(raw.to_ne_bytes()))
    })
}

// "    gateway: 192.168.1.1"
fn parse_route_get_default(output: &str) -> Option<Ipv4Addr> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("gateway:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|gw| gw.parse().ok())
}
