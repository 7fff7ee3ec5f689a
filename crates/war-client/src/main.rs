//! War client entry point.
//!
//! # Usage
//!
//! ```text
//! war-client client  <HOST> <PORT>
//! war-client clients <HOST> <PORT> <COUNT> [--max-in-flight <N>]
//! ```
//!
//! `client` plays one game and logs the verdict.  `clients` plays `COUNT`
//! games concurrently and logs how many completed.  Logging honours
//! `RUST_LOG` and defaults to `info`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use war_client::application::load::{run_clients, DEFAULT_MAX_IN_FLIGHT};
use war_client::infrastructure::network::play_game;

/// Peer client for the War card game server.
#[derive(Debug, Parser)]
#[command(name = "war-client", about = "Plays War against a server", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a single game.
    Client {
        /// Server host name or IP address.
        host: String,
        /// Server TCP port.
        port: u16,
    },
    /// Play many games at once.
    Clients {
        host: String,
        port: u16,
        /// Number of games to play.
        count: usize,
        /// Maximum number of simultaneously connected peers.
        #[arg(long, default_value_t = DEFAULT_MAX_IN_FLIGHT)]
        max_in_flight: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Command::Client { host, port } => {
            let summary = play_game(&host, port)
                .await
                .with_context(|| format!("game against {host}:{port} failed"))?;
            info!(
                "game complete, I {} ({} won, {} drawn, {} lost)",
                summary.verdict(),
                summary.wins,
                summary.draws,
                summary.losses
            );
        }
        Command::Clients {
            host,
            port,
            count,
            max_in_flight,
        } => {
            let completed = run_clients(&host, port, count, max_in_flight).await;
            info!("{completed} completed clients");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_defaults_max_in_flight() {
        let cli = Cli::parse_from(["war-client", "clients", "localhost", "4444", "50"]);
        match cli.command {
            Command::Clients {
                count,
                max_in_flight,
                ..
            } => {
                assert_eq!(count, 50);
                assert_eq!(max_in_flight, DEFAULT_MAX_IN_FLIGHT);
            }
            other => panic!("parsed {other:?}"),
        }
    }

    #[test]
    fn test_client_rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["war-client", "client", "localhost", "http"]).is_err());
    }

    #[test]
    fn test_max_in_flight_flag() {
        let cli = Cli::try_parse_from([
            "war-client",
            "clients",
            "127.0.0.1",
            "4444",
            "10",
            "--max-in-flight",
            "2",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Clients {
                max_in_flight: 2,
                ..
            }
        ));
    }
}
