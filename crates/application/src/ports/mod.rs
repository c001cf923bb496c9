mod event_sink;
mod gateway_locator;
mod mac_resolver;

pub use event_sink::EventSink;
pub use gateway_locator::GatewayLocator;
pub use mac_resolver::MacResolver;
