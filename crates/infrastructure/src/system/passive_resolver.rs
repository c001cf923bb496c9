use async_trait::async_trait;
use ferrous_arpwatch_application::ports::MacResolver;
use ferrous_arpwatch_domain::{DomainError, MacAddress, Platform, ResolutionResult};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::arp_reader::LinuxArpReader;
use super::command::CommandRunner;

/// Reads the MAC bound to an IP from the operating system's neighbor/ARP
/// cache. Never sends a packet.
///
/// Every command is bounded by the runner's own timeout, so the per-call
/// `timeout` is not used here.
pub struct PassiveArpResolver {
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    arp_reader: LinuxArpReader,
}

impl PassiveArpResolver {
    pub fn new(platform: Platform, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            platform,
            runner,
            arp_reader: LinuxArpReader::new(),
        }
    }

    pub fn with_arp_reader(mut self, arp_reader: LinuxArpReader) -> Self {
        self.arp_reader = arp_reader;
        self
    }

    async fn neighbor_table(&self, ip: &str) -> Result<Option<MacAddress>, DomainError> {
        let out = self.runner.run("ip", &["neigh", "show", ip]).await?;
        Ok(first_mac_token(&out))
    }

    async fn legacy_arp(&self, ip: &str) -> Result<Option<MacAddress>, DomainError> {
        let out = self.runner.run("arp", &["-n", ip]).await?;
        Ok(first_mac_token(&out))
    }

    async fn windows_arp_listing(&self, ip: &str) -> Result<Option<MacAddress>, DomainError> {
        let out = self.runner.run("arp", &["-a"]).await?;
        Ok(parse_windows_arp_listing(&out, ip))
    }

    async fn lookup(&self, ip: Ipv4Addr) -> Option<MacAddress> {
        let ip_str = ip.to_string();

        match self.platform {
            Platform::Linux => {
                if let Some(mac) = settle("ip neigh", self.neighbor_table(&ip_str).await) {
                    return Some(mac);
                }
                if let Some(mac) = settle("arp -n", self.legacy_arp(&ip_str).await) {
                    return Some(mac);
                }
                settle("/proc/net/arp", self.arp_reader.lookup(ip).await)
            }
            Platform::MacOs => {
                if let Some(mac) = settle("arp -n", self.legacy_arp(&ip_str).await) {
                    return Some(mac);
                }
                settle("ip neigh", self.neighbor_table(&ip_str).await)
            }
            Platform::Windows => settle("arp -a", self.windows_arp_listing(&ip_str).await),
            Platform::Unsupported => {
                debug!(platform = %self.platform, "No passive ARP source for platform");
                None
            }
        }
    }
}

#[async_trait]
impl MacResolver for PassiveArpResolver {
    fn name(&self) -> &'static str {
        "passive-arp-cache"
    }

    async fn resolve(&self, ip: Ipv4Addr, _timeout: Duration) -> ResolutionResult {
        self.lookup(ip).await.into()
    }
}

fn settle(source: &str, result: Result<Option<MacAddress>, DomainError>) -> Option<MacAddress> {
    match result {
        Ok(Some(mac)) => Some(mac),
        Ok(None) => {
            debug!(source, "No MAC in output");
            None
        }
        Err(e) => {
            debug!(source, error = %e, "ARP cache query failed");
            None
        }
    }
}

/// First whitespace token shaped like a colon-separated MAC.
///
/// Parentheses and `@` are treated as separators so BSD/Linux `arp` output
/// (`? (192.168.1.1) at 1c:1b:0d:...`) splits cleanly. Tokens with five
/// colons that are not six hex octets (IPv6 addresses) are skipped.
pub(crate) fn first_mac_token(output: &str) -> Option<MacAddress> {
    output
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '@'))
        .filter(|token| token.matches(':').count() == 5)
        .find_map(MacAddress::normalize)
}

// Lines look like: "  192.168.1.1           1c-1b-0d-aa-bb-cc     dynamic"
fn parse_windows_arp_listing(output: &str, ip: &str) -> Option<MacAddress> {
    output.lines().find_map(|line| {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 3 && tokens[0] == ip {
            MacAddress::normalize(tokens[1])
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddress {
        s.parse().unwrap()
    }

    #[test]
    fn test_ip_neigh_output() {
        let out = "192.168.1.1 dev wlan0 lladdr 1c:1b:0d:aa:bb:cc REACHABLE\n";
        assert_eq!(first_mac_token(out), Some(mac("1c:1b:0d:aa:bb:cc")));
    }

    #[test]
    fn test_ip_neigh_failed_entry_has_no_mac() {
        let out = "192.168.1.1 dev wlan0  FAILED\n";
        assert_eq!(first_mac_token(out), None);
    }

    #[test]
    fn test_linux_arp_output() {
        let out = "? (192.168.1.1) at 1c:1b:0d:aa:bb:cc [ether] on wlan0\n";
        assert_eq!(first_mac_token(out), Some(mac("1c:1b:0d:aa:bb:cc")));
    }

    #[test]
    fn test_macos_arp_output_with_short_octets() {
        let out = "? (192.168.1.1) at 1c:1b:d:1:2:3 on en0 ifscope [ethernet]\n";
        assert_eq!(first_mac_token(out), Some(mac("1c:1b:0d:01:02:03")));
    }

    #[test]
    fn test_net_tools_table_output() {
        let out = "Address                  HWtype  HWaddress           Flags Mask            Iface\n\
                   192.168.1.1              ether   1c:1b:0d:aa:bb:cc   C                     eth0\n";
        assert_eq!(first_mac_token(out), Some(mac("1c:1b:0d:aa:bb:cc")));
    }

    #[test]
    fn test_ipv6_like_token_is_skipped() {
        let out = "fe80::1:2:3:4 dev eth0 lladdr aa:bb:cc:dd:ee:ff router STALE\n";
        assert_eq!(first_mac_token(out), Some(mac("aa:bb:cc:dd:ee:ff")));
    }

    #[test]
    fn test_first_match_is_authoritative() {
        let out = "192.168.1.1 dev eth0 lladdr aa:bb:cc:dd:ee:ff REACHABLE\n\
                   192.168.1.1 dev wlan0 lladdr 11:22:33:44:55:66 STALE\n";
        assert_eq!(first_mac_token(out), Some(mac("aa:bb:cc:dd:ee:ff")));
    }

    #[test]
    fn test_windows_listing() {
        let out = "\r\nInterface: 192.168.1.20 --- 0xb\r\n  \
                   Internet Address      Physical Address      Type\r\n  \
                   192.168.1.1           1c-1b-0d-aa-bb-cc     dynamic\r\n  \
                   192.168.1.10          11-22-33-44-55-66     dynamic\r\n";

        assert_eq!(
            parse_windows_arp_listing(out, "192.168.1.1"),
            Some(mac("1c:1b:0d:aa:bb:cc"))
        );
        assert_eq!(
            parse_windows_arp_listing(out, "192.168.1.10"),
            Some(mac("11:22:33:44:55:66"))
        );
    }

    #[test]
    fn test_windows_listing_requires_exact_ip_token() {
        let out = "  192.168.1.10          11-22-33-44-55-66     dynamic\r\n";
        assert_eq!(parse_windows_arp_listing(out, "192.168.1.1"), None);
    }
}
