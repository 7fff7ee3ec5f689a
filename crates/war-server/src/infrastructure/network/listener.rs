//! TCP server: accept loop, pairing, and per-session task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured host and port.
//! 2. Accepting incoming connections one at a time.
//! 3. Appending each connection to the [`PairingQueue`].
//! 4. Spawning a [`GameSession`] task for every pair the queue yields.
//! 5. Stopping when the `running` flag is cleared.
//!
//! # Fault isolation
//!
//! Each session runs in its own Tokio task and owns its two streams.  A
//! session that faults closes its own peers and ends; the accept loop never
//! sees the error and keeps serving everyone else.  Sessions already in
//! flight when shutdown is requested run to completion on their own.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error, info};
use uuid::Uuid;
use war_core::Dealer;

use crate::infrastructure::network::pairing::PairingQueue;
use crate::infrastructure::network::session::{GameSession, SessionReport};

/// How long one `accept()` may block before the shutdown flag is rechecked.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A connection waiting in the pairing queue.
type Waiting = (TcpStream, SocketAddr);

/// Binds `addr` and serves games until `running` is set to `false`.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use or missing
/// permission).  Nothing else stops the loop.
pub async fn serve(addr: SocketAddr, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind game listener on {addr}"))?;

    serve_on(listener, running).await
}

/// Runs the accept loop on an already-bound listener.
///
/// Tests bind port 0 themselves and hand the listener in here.
///
/// # Errors
///
/// Returns an error only if the listener's local address cannot be read.
pub async fn serve_on(listener: TcpListener, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    let local = listener
        .local_addr()
        .context("failed to read listener address")?;
    info!("War server listening on {local}");

    let queue: PairingQueue<Waiting> = PairingQueue::new();

    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        match timeout(ACCEPT_POLL_INTERVAL, listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                debug!("connection accepted from {peer_addr}");
                queue.enqueue((stream, peer_addr));
                while let Some((p1, p2)) = queue.try_dequeue_pair() {
                    spawn_session(p1, p2);
                }
            }
            Ok(Err(e)) => {
                // Transient accept error (e.g., too many open file descriptors).
                error!("accept error: {e}");
            }
            Err(_) => {
                // No connection in the last interval; recheck the flag.
            }
        }
    }

    if !queue.is_empty() {
        info!("dropping {} unpaired connection(s)", queue.len());
    }
    Ok(())
}

fn spawn_session((s1, a1): Waiting, (s2, a2): Waiting) {
    let id = Uuid::new_v4();
    info!("session {id}: pairing {a1} (p1) with {a2} (p2)");
    tokio::spawn(async move {
        let mut dealer = Dealer::from_entropy();
        match GameSession::with_id(id, s1, s2).run(&mut dealer).await {
            SessionReport::Completed { .. } => debug!("session {id}: task finished"),
            SessionReport::Faulted { kind, peer, .. } => {
                debug!("session {id}: task finished after {kind:?} fault by {peer}")
            }
        }
    });
}
