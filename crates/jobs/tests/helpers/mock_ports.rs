#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_arpwatch_application::ports::{EventSink, MacResolver};
use ferrous_arpwatch_application::use_cases::{PollGatewayUseCase, ResolveGatewayMacUseCase};
use ferrous_arpwatch_domain::{MacAddress, MonitorEvent, ResolutionResult};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub fn mac(s: &str) -> MacAddress {
    s.parse().unwrap()
}

pub fn gateway() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, 1)
}

/// Passive resolver whose answer can be swapped mid-test, optionally slow.
pub struct MockMacResolver {
    answer: Arc<RwLock<ResolutionResult>>,
    delay: Duration,
    call_count: Arc<AtomicU64>,
}

impl MockMacResolver {
    pub fn new(answer: ResolutionResult) -> Self {
        Self {
            answer: Arc::new(RwLock::new(answer)),
            delay: Duration::ZERO,
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn set_answer(&self, answer: ResolutionResult) {
        *self.answer.write().await = answer;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MacResolver for MockMacResolver {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn resolve(&self, _ip: Ipv4Addr, _timeout: Duration) -> ResolutionResult {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        *self.answer.read().await
    }
}

/// Records emitted events, optionally taking `delay` to accept each one.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Arc<RwLock<Vec<MonitorEvent>>>,
    delay: Duration,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn events(&self) -> Vec<MonitorEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn emit(&self, event: &MonitorEvent) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.events.write().await.push(event.clone());
    }
}

pub fn poll_use_case(
    resolver: Arc<MockMacResolver>,
    sink: Arc<RecordingEventSink>,
) -> Arc<PollGatewayUseCase> {
    let resolve = Arc::new(ResolveGatewayMacUseCase::new(
        None,
        resolver,
        Duration::from_millis(50),
    ));
    Arc::new(PollGatewayUseCase::new(resolve, sink))
}
