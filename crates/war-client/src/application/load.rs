//! Load generator: many peers at once.
//!
//! Every peer is a separate Tokio task playing a full game.  A counting
//! [`Semaphore`] caps how many peers may be connected at the same time;
//! a task only starts once it holds a permit and releases it when its game
//! ends.  Failed peers are logged and simply not counted.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::infrastructure::network::{play_game, ClientError, GameSummary};

/// Default cap on simultaneously connected peers.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 1000;

/// Runs `count` peers against `host:port`, at most `max_in_flight` at once.
///
/// Returns how many peers completed their game.
pub async fn run_clients(host: &str, port: u16, count: usize, max_in_flight: usize) -> usize {
    let host: Arc<str> = Arc::from(host);
    run_with(count, max_in_flight, move |_| {
        let host = Arc::clone(&host);
        async move { play_game(&host, port).await }
    })
    .await
}

/// Runs `count` games produced by `launch`, gated by a semaphore.
///
/// `launch` receives the peer's index and is only called once a permit is
/// held, so no more than `max_in_flight` games are ever in progress.
pub async fn run_with<F, Fut>(count: usize, max_in_flight: usize, launch: F) -> usize
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<GameSummary, ClientError>> + Send + 'static,
{
    let permits = max_in_flight.clamp(1, Semaphore::MAX_PERMITS);
    if permits != max_in_flight {
        warn!("max_in_flight {max_in_flight} out of range; using {permits}");
    }
    let gate = Arc::new(Semaphore::new(permits));
    let mut games = JoinSet::new();

    for index in 0..count {
        // The semaphore is never closed, so acquiring cannot fail.
        let Ok(permit) = Arc::clone(&gate).acquire_owned().await else {
            break;
        };
        let game = launch(index);
        games.spawn(async move {
            let result = game.await;
            drop(permit);
            (index, result)
        });
    }

    let mut completed = 0;
    while let Some(joined) = games.join_next().await {
        match joined {
            Ok((index, Ok(summary))) => {
                debug!("client {index}: game complete, I {}", summary.verdict());
                completed += 1;
            }
            Ok((index, Err(e))) => error!("client {index}: {e}"),
            Err(e) => error!("client task failed: {e}"),
        }
    }
    completed
}
