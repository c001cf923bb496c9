pub mod monitor;
pub mod resolution;

pub use monitor::{BaselineRequest, EstablishBaselineUseCase, PollGatewayUseCase};
pub use resolution::ResolveGatewayMacUseCase;
