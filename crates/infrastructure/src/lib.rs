pub mod logging;
pub mod system;
