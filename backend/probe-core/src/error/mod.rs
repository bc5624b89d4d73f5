pub mod config;
pub mod probe;

pub use config::ConfigError;
pub use probe::ProbeError;
