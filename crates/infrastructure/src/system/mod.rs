pub mod active_resolver;
pub mod arp_reader;
pub mod command;
pub mod gateway_locator;
pub mod passive_resolver;

pub use active_resolver::ActiveArpResolver;
pub use arp_reader::LinuxArpReader;
pub use command::{CommandRunner, SystemCommandRunner};
pub use gateway_locator::SystemGatewayLocator;
pub use passive_resolver::PassiveArpResolver;
