use crate::mac_address::MacAddress;
use crate::monitor_event::MonitorEvent;
use crate::resolution::ResolutionResult;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitorStatus {
    #[default]
    Ok,
    Alerted,
}

/// State owned by the gateway monitor for the lifetime of the process.
///
/// Only exists once a baseline has been observed, so `baseline_mac` is always
/// present. Neither the baseline nor the expected MAC is ever changed by an
/// observation: accepting a new gateway MAC is an operator decision made by
/// restarting the monitor. Nothing is tallied across cycles; a miss only
/// replaces `last_observation`.
#[derive(Debug, Clone)]
pub struct MonitorState {
    gateway_ip: Ipv4Addr,
    expected_mac: Option<MacAddress>,
    baseline_mac: MacAddress,
    last_observation: ResolutionResult,
    status: MonitorStatus,
}

impl MonitorState {
    pub fn established(
        gateway_ip: Ipv4Addr,
        baseline_mac: MacAddress,
        expected_mac: Option<MacAddress>,
    ) -> Self {
        let status = match expected_mac {
            Some(expected) if expected != baseline_mac => MonitorStatus::Alerted,
            _ => MonitorStatus::Ok,
        };

        Self {
            gateway_ip,
            expected_mac,
            baseline_mac,
            last_observation: ResolutionResult::Resolved(baseline_mac),
            status,
        }
    }

    /// Alert raised before the poll loop when the pinned MAC does not match
    /// the first observation.
    pub fn initial_alert(&self) -> Option<MonitorEvent> {
        match self.expected_mac {
            Some(expected) if expected != self.baseline_mac => {
                Some(MonitorEvent::ExpectedMismatchAtStart {
                    observed: self.baseline_mac,
                    expected,
                })
            }
            _ => None,
        }
    }

    /// Fold one poll-cycle observation into the state.
    ///
    /// Returns the event to report, if any. A match produces nothing.
    pub fn observe(&mut self, observation: ResolutionResult) -> Option<MonitorEvent> {
        self.last_observation = observation;

        let current = match observation {
            ResolutionResult::Resolved(mac) => mac,
            ResolutionResult::Unresolved => {
                return Some(MonitorEvent::ObservationMissed {
                    ip: self.gateway_ip,
                });
            }
        };

        let event = match self.expected_mac {
            Some(expected) if current != expected => {
                Some(MonitorEvent::ChangedFromExpected { current, expected })
            }
            Some(_) => None,
            None if current != self.baseline_mac => Some(MonitorEvent::ChangedFromBaseline {
                baseline: self.baseline_mac,
                current,
            }),
            None => None,
        };

        self.status = if event.is_some() {
            MonitorStatus::Alerted
        } else {
            MonitorStatus::Ok
        };

        event
    }

    pub fn gateway_ip(&self) -> Ipv4Addr {
        self.gateway_ip
    }

    pub fn expected_mac(&self) -> Option<MacAddress> {
        self.expected_mac
    }

    pub fn baseline_mac(&self) -> MacAddress {
        self.baseline_mac
    }

    pub fn last_observation(&self) -> ResolutionResult {
        self.last_observation
    }

    pub fn status(&self) -> MonitorStatus {
        self.status
    }
}
