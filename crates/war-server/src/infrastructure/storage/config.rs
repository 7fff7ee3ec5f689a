//! TOML-based configuration for the War server.
//!
//! The server reads an optional config file.  Its location is, in order:
//!
//! 1. the path given with `--config` (or `WAR_CONFIG`),
//! 2. the platform default:
//!    - Linux:   `$XDG_CONFIG_HOME/war/server.toml` or `~/.config/war/server.toml`
//!    - macOS:   `~/Library/Application Support/War/server.toml`
//!    - Windows: `%APPDATA%\War\server.toml`
//!
//! A missing file is not an error; every field has a default.  Example:
//!
//! ```toml
//! log_level = "debug"
//!
//! [network]
//! host = "127.0.0.1"
//! port = 4444
//! ```
//!
//! Command-line flags override whatever the file says (see `main.rs`).

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `host:port` does not resolve to any socket address.
    #[error("cannot resolve listen address {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    /// `tracing` level used when `RUST_LOG` is unset:
    /// `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Listening address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Host name or IP to bind.  `"0.0.0.0"` binds all interfaces.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port peers connect to.
    #[serde(default = "default_port")]
    pub port: u16,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    4444
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Resolves `network.host:network.port` to the first matching address.
    ///
    /// Host names go through the system resolver, so call this before the
    /// runtime is busy.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Resolve`] if the host is invalid or resolves to nothing.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let NetworkConfig { host, port } = &self.network;
        let resolve_err = |source| ConfigError::Resolve {
            host: host.clone(),
            port: *port,
            source,
        };
        (host.as_str(), *port)
            .to_socket_addrs()
            .map_err(resolve_err)?
            .next()
            .ok_or_else(|| {
                resolve_err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no addresses found",
                ))
            })
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parses a config from TOML text.
///
/// # Errors
///
/// [`ConfigError::Parse`] if the TOML is malformed or a field has the wrong type.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads the config from `path`, or from the platform default location when
/// `path` is `None`.  Returns [`ServerConfig::default()`] if there is no file.
///
/// # Errors
///
/// [`ConfigError::Io`] for file-system errors other than "not found", and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(ServerConfig::default()),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Platform default config file, if a base directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    platform_config_dir().map(|d| d.join("server.toml"))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("War"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("war"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("War"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
