pub mod establish_baseline;
pub mod poll_gateway;

pub use establish_baseline::{BaselineRequest, EstablishBaselineUseCase};
pub use poll_gateway::PollGatewayUseCase;
