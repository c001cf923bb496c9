#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_arpwatch_application::ports::{EventSink, GatewayLocator, MacResolver};
use ferrous_arpwatch_domain::{MacAddress, MonitorEvent, ResolutionResult};
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub fn mac(s: &str) -> MacAddress {
    s.parse().unwrap()
}

pub fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

/// Resolver answering from a script, then repeating a fallback answer.
pub struct MockMacResolver {
    name: &'static str,
    script: Arc<RwLock<VecDeque<ResolutionResult>>>,
    fallback: Arc<RwLock<ResolutionResult>>,
    queried: Arc<RwLock<Vec<Ipv4Addr>>>,
    call_count: Arc<AtomicU64>,
}

impl MockMacResolver {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            script: Arc::new(RwLock::new(VecDeque::new())),
            fallback: Arc::new(RwLock::new(ResolutionResult::Unresolved)),
            queried: Arc::new(RwLock::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn resolving(name: &'static str, mac: MacAddress) -> Self {
        let resolver = Self::new(name);
        *resolver.fallback.try_write().unwrap() = ResolutionResult::Resolved(mac);
        resolver
    }

    pub fn scripted(name: &'static str, script: Vec<ResolutionResult>) -> Self {
        let resolver = Self::new(name);
        *resolver.script.try_write().unwrap() = script.into();
        resolver
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub async fn queried(&self) -> Vec<Ipv4Addr> {
        self.queried.read().await.clone()
    }

    pub async fn set_answer(&self, result: ResolutionResult) {
        *self.fallback.write().await = result;
    }
}

#[async_trait]
impl MacResolver for MockMacResolver {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn resolve(&self, ip: Ipv4Addr, _timeout: Duration) -> ResolutionResult {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.queried.write().await.push(ip);
        if let Some(next) = self.script.write().await.pop_front() {
            return next;
        }
        *self.fallback.read().await
    }
}

pub struct MockGatewayLocator {
    gateway: Option<Ipv4Addr>,
    call_count: Arc<AtomicU64>,
}

impl MockGatewayLocator {
    pub fn new(gateway: Option<Ipv4Addr>) -> Self {
        Self {
            gateway,
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GatewayLocator for MockGatewayLocator {
    async fn detect_default_gateway(&self) -> Option<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.gateway
    }
}

#[derive(Default)]
pub struct RecordingEventSink {
    events: Arc<RwLock<Vec<MonitorEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<MonitorEvent> {
        self.events.read().await.clone()
    }

    pub async fn alert_count(&self) -> usize {
        self.events.read().await.iter().filter(|e| e.is_alert()).count()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn emit(&self, event: &MonitorEvent) {
        self.events.write().await.push(event.clone());
    }
}
