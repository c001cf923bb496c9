use crate::mac_address::MacAddress;
use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Alert => "alert",
        }
    }
}

/// Operator-facing events produced while establishing and watching the
/// gateway binding. `Display` renders the log line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    GatewayAutoDetected {
        ip: Ipv4Addr,
    },
    RetryingWithDetectedGateway {
        ip: Ipv4Addr,
    },
    BaselineEstablished {
        ip: Ipv4Addr,
        mac: MacAddress,
    },
    BaselineUnresolved {
        ip: Ipv4Addr,
    },
    ExpectedMismatchAtStart {
        observed: MacAddress,
        expected: MacAddress,
    },
    ChangedFromExpected {
        current: MacAddress,
        expected: MacAddress,
    },
    ChangedFromBaseline {
        baseline: MacAddress,
        current: MacAddress,
    },
    ObservationMissed {
        ip: Ipv4Addr,
    },
}

impl MonitorEvent {
    pub fn severity(&self) -> Severity {
        match self {
            Self::GatewayAutoDetected { .. }
            | Self::RetryingWithDetectedGateway { .. }
            | Self::BaselineEstablished { .. } => Severity::Info,
            Self::ObservationMissed { .. } => Severity::Warning,
            Self::BaselineUnresolved { .. }
            | Self::ExpectedMismatchAtStart { .. }
            | Self::ChangedFromExpected { .. }
            | Self::ChangedFromBaseline { .. } => Severity::Alert,
        }
    }

    pub fn is_alert(&self) -> bool {
        self.severity() == Severity::Alert
    }
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GatewayAutoDetected { ip } => write!(f, "Auto-detected gateway: {}", ip),
            Self::RetryingWithDetectedGateway { ip } => {
                write!(f, "Retrying with detected gateway {}", ip)
            }
            Self::BaselineEstablished { ip, mac } => {
                write!(f, "Initial gateway MAC for {}: {}", ip, mac)
            }
            Self::BaselineUnresolved { ip } => write!(
                f,
                "Could not resolve MAC for gateway {}. Is the IP correct and reachable?",
                ip
            ),
            Self::ExpectedMismatchAtStart { observed, expected } => write!(
                f,
                "ALERT: Gateway MAC {} != expected {}. Possible ARP spoofing!",
                observed, expected
            ),
            Self::ChangedFromExpected { current, expected } => write!(
                f,
                "ALERT: Gateway MAC changed to {}, expected {}. Possible MITM!",
                current, expected
            ),
            Self::ChangedFromBaseline { baseline, current } => write!(
                f,
                "ALERT: Gateway MAC changed! was {}, now {}. Possible ARP spoofing.",
                baseline, current
            ),
            Self::ObservationMissed { ip } => write!(
                f,
                "Warning: Could not read current MAC for {}. Network hiccup?",
                ip
            ),
        }
    }
}
