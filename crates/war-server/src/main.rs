//! War server entry point.
//!
//! Loads configuration, installs logging, and runs the accept loop until
//! Ctrl-C.
//!
//! # Usage
//!
//! ```text
//! war-server [OPTIONS]
//!
//! Options:
//!   --config <FILE>   TOML config file [env: WAR_CONFIG]
//!   --host   <HOST>   Address to bind [env: WAR_HOST]
//!   --port   <PORT>   Port to bind [env: WAR_PORT]
//! ```
//!
//! Flags override the config file; the config file overrides the built-in
//! defaults (`0.0.0.0:4444`).  The log level comes from `RUST_LOG`, falling
//! back to the config file's `log_level`.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use war_server::infrastructure::network::serve;
use war_server::infrastructure::storage::{load_config, ServerConfig};

/// Two-player War card game server.
#[derive(Debug, Parser)]
#[command(name = "war-server", about = "Pairs peers and referees games of War", version)]
struct Cli {
    /// TOML configuration file.  Defaults to the platform config directory.
    #[arg(long, env = "WAR_CONFIG")]
    config: Option<PathBuf>,

    /// Host name or IP address to bind.
    #[arg(long, env = "WAR_HOST")]
    host: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "WAR_PORT")]
    port: Option<u16>,
}

impl Cli {
    /// Loads the config file and applies the command-line overrides.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = load_config(self.config.as_deref()).context("failed to load config")?;
        if let Some(host) = self.host {
            config.network.host = host;
        }
        if let Some(port) = self.port {
            config.network.port = port;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_server_config()?;

    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let addr = config
        .socket_addr()
        .context("invalid listen address in config")?;
    info!("War server starting on {addr}");

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => error!("failed to listen for Ctrl-C: {e}"),
        }
    });

    serve(addr, running).await?;

    info!("War server stopped");
    Ok(())
}
