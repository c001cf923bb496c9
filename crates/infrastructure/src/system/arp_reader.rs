use ferrous_arpwatch_domain::{DomainError, MacAddress};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

pub type ArpTable = HashMap<Ipv4Addr, MacAddress>;

/// Linux ARP cache reader (reads /proc/net/arp)
pub struct LinuxArpReader {
    arp_path: PathBuf,
}

impl LinuxArpReader {
    pub fn new() -> Self {
        Self {
            arp_path: PathBuf::from("/proc/net/arp"),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            arp_path: path.into(),
        }
    }

    pub async fn read_arp_table(&self) -> Result<ArpTable, DomainError> {
        let content = fs::read_to_string(&self.arp_path)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to read ARP cache: {}", e)))?;

        let table = parse_arp_table(&content);
        debug!(entries = table.len(), "ARP table parsed");
        Ok(table)
    }

    pub async fn lookup(&self, ip: Ipv4Addr) -> Result<Option<MacAddress>, DomainError> {
        Ok(self.read_arp_table().await?.get(&ip).copied())
    }
}

impl Default for LinuxArpReader {
    fn default() -> Self {
        Self::new()
    }
}

// Format of /proc/net/arp:
// IP address       HW type     Flags       HW address            Mask     Device
// 192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
fn parse_arp_table(content: &str) -> ArpTable {
    let mut table = ArpTable::new();

    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }

        let (ip_str, flags, mac_str) = (fields[0], fields[2], fields[3]);

        // 0x2 = ATF_COM; incomplete entries carry an all-zero MAC
        if flags != "0x2" {
            continue;
        }

        let ip = match ip_str.parse::<Ipv4Addr>() {
            Ok(ip) => ip,
            Err(e) => {
                warn!(error = %e, ip = ip_str, "Invalid IP in ARP table");
                continue;
            }
        };

        match MacAddress::normalize(mac_str) {
            Some(mac) if !mac.is_zero() => {
                // First listed binding is authoritative.
                table.entry(ip).or_insert(mac);
            }
            Some(_) => {}
            None => warn!(mac = mac_str, ip = ip_str, "Invalid MAC in ARP table"),
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_parse_arp_table() {
        let content = r#"IP address       HW type     Flags       HW address            Mask     Device
192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
192.168.1.2      0x1         0x2         11:22:33:44:55:66     *        eth0
192.168.1.3      0x1         0x0         00:00:00:00:00:00     *        eth0
invalid.ip       0x1         0x2         ff:ff:ff:ff:ff:ff     *        eth0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let reader = LinuxArpReader::with_path(temp_file.path());
        let arp_table = reader.read_arp_table().await.unwrap();

        assert_eq!(arp_table.len(), 2);
        assert_eq!(
            arp_table.get(&Ipv4Addr::new(192, 168, 1, 1)),
            Some(&"aa:bb:cc:dd:ee:ff".parse().unwrap())
        );
        assert!(arp_table.get(&Ipv4Addr::new(192, 168, 1, 3)).is_none());
    }

    #[tokio::test]
    async fn test_lookup_single_entry() {
        let content = r#"IP address       HW type     Flags       HW address            Mask     Device
10.0.0.1         0x1         0x2         AA:BB:CC:00:00:01     *        wlan0
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let reader = LinuxArpReader::with_path(temp_file.path());

        assert_eq!(
            reader.lookup(Ipv4Addr::new(10, 0, 0, 1)).await.unwrap(),
            Some("aa:bb:cc:00:00:01".parse().unwrap())
        );
        assert_eq!(reader.lookup(Ipv4Addr::new(10, 0, 0, 2)).await.unwrap(), None);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = r#"IP address       HW type     Flags       HW address            Mask     Device
192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
incomplete line
192.168.1.2
192.168.1.4      0x1         0x2         not-a-mac             *        eth0
192.168.1.5      0x1         0x2         11:22:33:44:55:66     *        eth0
"#;

        assert_eq!(parse_arp_table(content).len(), 2);
    }

    #[tokio::test]
    async fn test_nonexistent_arp_file() {
        let reader = LinuxArpReader::with_path("/nonexistent/path");
        assert!(reader.read_arp_table().await.is_err());
    }
}
