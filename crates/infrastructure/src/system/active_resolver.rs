//! Live ARP queries over a raw datalink channel.
//!
//! Opening the channel needs a packet-capture capability (`CAP_NET_RAW` on
//! Linux, Npcap on Windows). `ActiveArpResolver::probe` checks for it once at
//! startup; when the probe fails the caller falls back to the passive
//! resolver alone. Built without the `active-arp` feature the probe always
//! fails.

use async_trait::async_trait;
use ferrous_arpwatch_application::ports::MacResolver;
use ferrous_arpwatch_domain::{DomainError, ResolutionResult};
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::debug;

pub struct ActiveArpResolver {
    interface_name: Option<String>,
    retries: u32,
}

impl ActiveArpResolver {
    /// Feature-probe: succeeds only if a usable interface exists and a
    /// datalink channel can be opened on it.
    pub fn probe(interface_name: Option<&str>, retries: u32) -> Result<Self, DomainError> {
        #[cfg(feature = "active-arp")]
        {
            capture::probe(interface_name)?;
            Ok(Self {
                interface_name: interface_name.map(str::to_string),
                retries,
            })
        }

        #[cfg(not(feature = "active-arp"))]
        {
            let _ = (interface_name, retries);
            Err(DomainError::TransportUnavailable(
                "built without the active-arp feature".to_string(),
            ))
        }
    }
}

#[async_trait]
impl MacResolver for ActiveArpResolver {
    fn name(&self) -> &'static str {
        "active-arp"
    }

    async fn resolve(&self, ip: Ipv4Addr, timeout: Duration) -> ResolutionResult {
        #[cfg(feature = "active-arp")]
        {
            let interface_name = self.interface_name.clone();
            let retries = self.retries;
            let query = tokio::task::spawn_blocking(move || {
                capture::query(interface_name.as_deref(), ip, timeout, retries)
            });

            match query.await {
                Ok(Ok(mac)) => mac.into(),
                Ok(Err(e)) => {
                    debug!(ip = %ip, error = %e, "Active ARP query failed");
                    ResolutionResult::Unresolved
                }
                Err(e) => {
                    debug!(ip = %ip, error = %e, "Active ARP task aborted");
                    ResolutionResult::Unresolved
                }
            }
        }

        #[cfg(not(feature = "active-arp"))]
        {
            let _ = (&self.interface_name, self.retries, timeout);
            debug!(ip = %ip, "Active ARP unavailable");
            ResolutionResult::Unresolved
        }
    }
}

#[cfg(feature = "active-arp")]
mod capture {
    use ferrous_arpwatch_domain::{DomainError, MacAddress};
    use pnet::datalink::{
        self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface,
    };
    use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
    use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
    use pnet::packet::Packet;
    use pnet::util::MacAddr;
    use std::io;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::{Duration, Instant};
    use tracing::debug;

    /// Broadcast MAC address for ARP requests
    const BROADCAST_MAC: MacAddr = MacAddr(0xff, 0xff, 0xff, 0xff, 0xff, 0xff);

    const ETHERNET_HEADER_LEN: usize = 14;
    const ARP_PACKET_LEN: usize = 28;
    const ARP_FRAME_LEN: usize = ETHERNET_HEADER_LEN + ARP_PACKET_LEN;

    /// Receive poll granularity; the overall wait is bounded by the query timeout.
    const READ_TIMEOUT: Duration = Duration::from_millis(100);

    pub(super) struct Endpoint {
        pub interface: NetworkInterface,
        pub mac: MacAddr,
        pub ip: Ipv4Addr,
    }

    type DataLink = (Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>);

    pub(super) fn probe(interface_name: Option<&str>) -> Result<(), DomainError> {
        let interfaces = datalink::interfaces();
        let endpoint = select_endpoint(&interfaces, interface_name, None).ok_or_else(|| {
            DomainError::TransportUnavailable("no usable network interface".to_string())
        })?;
        open_channel(&endpoint.interface)?;
        debug!(interface = %endpoint.interface.name, "Active ARP transport available");
        Ok(())
    }

    pub(super) fn query(
        interface_name: Option<&str>,
        target: Ipv4Addr,
        timeout: Duration,
        retries: u32,
    ) -> Result<Option<MacAddress>, DomainError> {
        let interfaces = datalink::interfaces();
        let endpoint = select_endpoint(&interfaces, interface_name, Some(target))
            .ok_or_else(|| {
                DomainError::TransportUnavailable("no usable network interface".to_string())
            })?;
        let (mut tx, mut rx) = open_channel(&endpoint.interface)?;
        let request = build_arp_request(endpoint.mac, endpoint.ip, target)?;

        for attempt in 0..=retries {
            match tx.send_to(&request, None) {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    return Err(DomainError::ResolutionFailure(format!(
                        "ARP send failed: {}",
                        e
                    )))
                }
                None => {
                    return Err(DomainError::ResolutionFailure(
                        "ARP send buffer unavailable".to_string(),
                    ))
                }
            }

            let deadline = Instant::now() + timeout;
            while Instant::now() < deadline {
                match rx.next() {
                    Ok(frame) => {
                        if let Some(mac) = parse_arp_reply(frame, target) {
                            return Ok(Some(mac));
                        }
                    }
                    Err(e)
                        if matches!(
                            e.kind(),
                            io::ErrorKind::TimedOut
                                | io::ErrorKind::WouldBlock
                                | io::ErrorKind::Interrupted
                        ) => {}
                    Err(e) => {
                        return Err(DomainError::ResolutionFailure(format!(
                            "ARP receive failed: {}",
                            e
                        )))
                    }
                }
            }

            debug!(ip = %target, attempt, "No ARP reply within timeout");
        }

        Ok(None)
    }

    fn open_channel(interface: &NetworkInterface) -> Result<DataLink, DomainError> {
        let config = Config {
            read_timeout: Some(READ_TIMEOUT),
            ..Default::default()
        };

        match datalink::channel(interface, config) {
            Ok(Channel::Ethernet(tx, rx)) => Ok((tx, rx)),
            Ok(_) => Err(DomainError::TransportUnavailable(
                "unsupported channel type".to_string(),
            )),
            Err(e) => Err(DomainError::TransportUnavailable(format!(
                "cannot open {}: {}",
                interface.name, e
            ))),
        }
    }

    /// Up, non-loopback interface with a real MAC and an IPv4 address.
    /// Prefers the interface whose network contains `target`.
    pub(super) fn select_endpoint(
        interfaces: &[NetworkInterface],
        interface_name: Option<&str>,
        target: Option<Ipv4Addr>,
    ) -> Option<Endpoint> {
        let mut candidates = Vec::new();

        for interface in interfaces {
            if interface_name.is_some_and(|name| name != interface.name) {
                continue;
            }
            if interface.is_loopback() || !interface.is_up() {
                continue;
            }
            let mac = match interface.mac {
                Some(mac) if mac != MacAddr::zero() => mac,
                _ => continue,
            };

            for network in &interface.ips {
                let ip = match network.ip() {
                    IpAddr::V4(ip) if !ip.is_unspecified() && network.prefix() > 0 => ip,
                    _ => continue,
                };
                let on_link = target.is_some_and(|t| network.contains(IpAddr::V4(t)));
                candidates.push((on_link, interface.clone(), mac, ip));
            }
        }

        if candidates.is_empty() {
            return None;
        }

        let index = candidates
            .iter()
            .position(|(on_link, ..)| *on_link)
            .unwrap_or(0);
        let (_, interface, mac, ip) = candidates.swap_remove(index);
        Some(Endpoint { interface, mac, ip })
    }

    /// Broadcast Ethernet frame carrying an ARP who-has for `target_ip`.
    pub(super) fn build_arp_request(
        source_mac: MacAddr,
        source_ip: Ipv4Addr,
        target_ip: Ipv4Addr,
    ) -> Result<Vec<u8>, DomainError> {
        let mut buffer = vec![0u8; ARP_FRAME_LEN];

        {
            let mut ethernet = MutableEthernetPacket::new(&mut buffer[..ETHERNET_HEADER_LEN])
                .ok_or_else(|| {
                    DomainError::ResolutionFailure("Ethernet buffer too small".to_string())
                })?;
            ethernet.set_destination(BROADCAST_MAC);
            ethernet.set_source(source_mac);
            ethernet.set_ethertype(EtherTypes::Arp);
        }

        {
            let mut arp = MutableArpPacket::new(&mut buffer[ETHERNET_HEADER_LEN..])
                .ok_or_else(|| DomainError::ResolutionFailure("ARP buffer too small".to_string()))?;
            arp.set_hardware_type(ArpHardwareTypes::Ethernet);
            arp.set_protocol_type(EtherTypes::Ipv4);
            arp.set_hw_addr_len(6);
            arp.set_proto_addr_len(4);
            arp.set_operation(ArpOperations::Request);
            arp.set_sender_hw_addr(source_mac);
            arp.set_sender_proto_addr(source_ip);
            arp.set_target_hw_addr(MacAddr::zero());
            arp.set_target_proto_addr(target_ip);
        }

        Ok(buffer)
    }

    /// Sender hardware address of an ARP reply sent on behalf of `target`.
    pub(super) fn parse_arp_reply(frame: &[u8], target: Ipv4Addr) -> Option<MacAddress> {
        let ethernet = EthernetPacket::new(frame)?;
        if ethernet.get_ethertype() != EtherTypes::Arp {
            return None;
        }

        let arp = ArpPacket::new(ethernet.payload())?;
        if arp.get_operation() != ArpOperations::Reply || arp.get_sender_proto_addr() != target {
            return None;
        }

        let sender = arp.get_sender_hw_addr();
        let mac = MacAddress::new([sender.0, sender.1, sender.2, sender.3, sender.4, sender.5]);
        (!mac.is_zero() && !mac.is_broadcast()).then_some(mac)
    }

}
