pub mod resolve_gateway_mac;

pub use resolve_gateway_mac::ResolveGatewayMacUseCase;
