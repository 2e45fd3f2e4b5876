//! Configuration types and the embedded config reader

pub mod toml;
mod types;

pub use types::{
    ConfigError, SessionConfig, DEFAULT_PACKET_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_PRETEND_PRINT_MS,
};
