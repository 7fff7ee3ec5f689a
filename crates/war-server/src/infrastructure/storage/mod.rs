//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the optional TOML configuration file and
//! falls back to defaults when the file does not exist.

pub mod config;

pub use config::{load_config, ConfigError, ServerConfig};
