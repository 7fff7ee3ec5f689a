//! Game session: one paired match from handshake to completion or fault.
//!
//! # Protocol state machine
//!
//! ```text
//! AwaitWant ──► Dealing ──► Round(1..=26) ──► Complete
//!     │            │              │
//!     └────────────┴──────────────┴──────► Faulted
//! ```
//!
//! - **AwaitWant**: read one WANTGAME from each peer.  Both reads run
//!   concurrently and both must succeed.
//! - **Dealing**: deal once, send each peer a GAMESTART with its own hand.
//! - **Round**: read one PLAYCARD from each peer (concurrently), validate both,
//!   then send each peer its PLAYRESULT.  Neither peer can get more than one
//!   message pair ahead of the other.
//! - **Complete / Faulted**: both streams are shut down.  After a fault no
//!   further results are sent, not even for the round in progress.
//!
//! A session owns its two streams and its [`GameState`] outright; nothing is
//! shared with other sessions.

use std::fmt;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};
use uuid::Uuid;
use war_core::{DeckSource, Opcode, ProtocolError, WarMessage, HAND_SIZE};

use crate::application::adjudicate::{CardViolation, GameState, Peer};
use crate::infrastructure::network::wire::{read_card, read_frame, write_message};

/// Why a session was torn down early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Short read, disconnect mid-message, or failed write.
    #[error("connection fault on {peer}: {source}")]
    Connection {
        peer: Peer,
        #[source]
        source: std::io::Error,
    },

    /// A message carried the wrong opcode for the current state.
    #[error("protocol fault on {peer}: {source}")]
    Protocol {
        peer: Peer,
        #[source]
        source: ProtocolError,
    },

    /// A card foreign to the peer's hand, or one it already played.
    #[error("card violation: {0}")]
    CardViolation(#[from] CardViolation),
}

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Connection,
    Protocol,
    CardViolation,
}

impl SessionError {
    pub fn kind(&self) -> FaultKind {
        match self {
            SessionError::Connection { .. } => FaultKind::Connection,
            SessionError::Protocol { .. } => FaultKind::Protocol,
            SessionError::CardViolation(_) => FaultKind::CardViolation,
        }
    }

    /// The peer whose stream or message caused the fault.
    pub fn peer(&self) -> Peer {
        match self {
            SessionError::Connection { peer, .. } | SessionError::Protocol { peer, .. } => *peer,
            SessionError::CardViolation(v) => v.peer(),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionReport {
    /// All 26 rounds were adjudicated.
    Completed { p1_score: u32, p2_score: u32 },
    /// The session stopped early.
    Faulted {
        kind: FaultKind,
        peer: Peer,
        rounds_played: usize,
    },
}

/// Where in the protocol a session currently is; used to label faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Handshake,
    Deal,
    Round(usize),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Handshake => f.write_str("handshake"),
            Phase::Deal => f.write_str("deal"),
            Phase::Round(n) => write!(f, "round {n}"),
        }
    }
}

/// A paired match over two byte streams.
///
/// Generic over the stream type so it runs over `TcpStream` in production and
/// over in-memory `tokio::io::duplex` pipes in tests.
pub struct GameSession<S> {
    id: Uuid,
    p1: S,
    p2: S,
    phase: Phase,
    rounds_played: usize,
}

impl<S> GameSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(p1: S, p2: S) -> Self {
        Self::with_id(Uuid::new_v4(), p1, p2)
    }

    pub fn with_id(id: Uuid, p1: S, p2: S) -> Self {
        Self {
            id,
            p1,
            p2,
            phase: Phase::Handshake,
            rounds_played: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Plays the whole game, then closes both streams.
    ///
    /// Never returns an error: faults are logged, both peers are
    /// disconnected, and the outcome is reported as [`SessionReport::Faulted`].
    pub async fn run<D>(mut self, dealer: &mut D) -> SessionReport
    where
        D: DeckSource + ?Sized,
    {
        let result = self.play(dealer).await;
        let report = match result {
            Ok((p1_score, p2_score)) => {
                info!(
                    "session {}: complete after {HAND_SIZE} rounds (p1 {p1_score}, p2 {p2_score})",
                    self.id
                );
                SessionReport::Completed { p1_score, p2_score }
            }
            Err(e) => {
                warn!("session {}: terminated during {}: {e}", self.id, self.phase);
                SessionReport::Faulted {
                    kind: e.kind(),
                    peer: e.peer(),
                    rounds_played: self.rounds_played,
                }
            }
        };
        self.close_both().await;
        report
    }

    async fn play<D>(&mut self, dealer: &mut D) -> Result<(u32, u32), SessionError>
    where
        D: DeckSource + ?Sized,
    {
        // ── AwaitWant ──────────────────────────────────────────────────────────
        self.phase = Phase::Handshake;
        tokio::try_join!(
            read_frame(&mut self.p1, Peer::One, Opcode::WantGame),
            read_frame(&mut self.p2, Peer::Two, Opcode::WantGame),
        )?;
        debug!("session {}: both peers want a game", self.id);

        // ── Dealing ────────────────────────────────────────────────────────────
        self.phase = Phase::Deal;
        let (hand1, hand2) = dealer.deal();
        let mut game = GameState::new(hand1.clone(), hand2.clone());
        let start1 = WarMessage::GameStart(hand1);
        let start2 = WarMessage::GameStart(hand2);
        tokio::try_join!(
            write_message(&mut self.p1, Peer::One, &start1),
            write_message(&mut self.p2, Peer::Two, &start2),
        )?;

        // ── Rounds ─────────────────────────────────────────────────────────────
        while !game.is_complete() {
            self.phase = Phase::Round(game.rounds_played() + 1);
            let (c1, c2) = tokio::try_join!(
                read_card(&mut self.p1, Peer::One),
                read_card(&mut self.p2, Peer::Two),
            )?;

            let outcome = game.play_round(c1, c2)?;
            self.rounds_played = game.rounds_played();
            debug!(
                "session {}: round {}: {} vs {} -> {:?}/{:?}",
                self.id, self.rounds_played, c1, c2, outcome.p1, outcome.p2
            );

            let result1 = WarMessage::PlayResult(outcome.p1);
            let result2 = WarMessage::PlayResult(outcome.p2);
            tokio::try_join!(
                write_message(&mut self.p1, Peer::One, &result1),
                write_message(&mut self.p2, Peer::Two, &result2),
            )?;
        }

        Ok(game.scores())
    }

    /// Shuts down each stream independently; a failure on one is logged and
    /// does not stop the attempt on the other.
    async fn close_both(mut self) {
        if let Err(e) = self.p1.shutdown().await {
            debug!("session {}: closing p1 failed: {e}", self.id);
        }
        if let Err(e) = self.p2.shutdown().await {
            debug!("session {}: closing p2 failed: {e}", self.id);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{duplex, AsyncReadExt, DuplexStream};
    use war_core::FixedDeck;

    fn pipes() -> (DuplexStream, DuplexStream, DuplexStream, DuplexStream) {
        let (c1, s1) = duplex(256);
        let (c2, s2) = duplex(256);
        (c1, c2, s1, s2)
    }

    async fn read_to_end(mut s: DuplexStream) -> Vec<u8> {
        let mut buf = Vec::new();
        s.read_to_end(&mut buf).await.unwrap();
        buf
    }

    #[test]
    fn test_fault_kind_matches_variant() {
        let e = SessionError::from(CardViolation::Replayed {
            peer: Peer::Two,
            card: 4,
        });
        assert_eq!(e.kind(), FaultKind::CardViolation);
        assert_eq!(e.peer(), Peer::Two);
    }

    #[tokio::test]
    async fn test_bad_handshake_closes_both_before_game_start() {
        let (mut c1, mut c2, s1, s2) = pipes();
        c1.write_all(&[0, 0]).await.unwrap();
        c2.write_all(&[2, 0]).await.unwrap();

        let report = GameSession::new(s1, s2).run(&mut FixedDeck::ordered()).await;

        assert_eq!(
            report,
            SessionReport::Faulted {
                kind: FaultKind::Protocol,
                peer: Peer::Two,
                rounds_played: 0
            }
        );
        assert!(read_to_end(c1).await.is_empty());
        assert!(read_to_end(c2).await.is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_during_handshake_faults_session() {
        let (mut c1, c2, s1, s2) = pipes();
        c1.write_all(&[0, 0]).await.unwrap();
        drop(c2);

        let report = GameSession::new(s1, s2).run(&mut FixedDeck::ordered()).await;

        assert!(matches!(
            report,
            SessionReport::Faulted {
                kind: FaultKind::Connection,
                peer: Peer::Two,
                ..
            }
        ));
        assert!(read_to_end(c1).await.is_empty());
    }

    #[tokio::test]
    async fn test_write_fault_while_dealing_is_connection_fault() {
        let (mut c1, mut c2, s1, s2) = pipes();
        c1.write_all(&[0, 0]).await.unwrap();
        c2.write_all(&[0, 0]).await.unwrap();
        drop(c2);

        let mut session = GameSession::new(s1, s2);
        let err = session.play(&mut FixedDeck::ordered()).await.unwrap_err();

        assert_eq!(err.kind(), FaultKind::Connection);
        assert_eq!(err.peer(), Peer::Two);
        assert_eq!(session.phase, Phase::Deal);
    }

    #[tokio::test]
    async fn test_fault_phase_names_the_failing_step() {
        let (mut c1, mut c2, s1, s2) = pipes();
        c1.write_all(&[0, 0]).await.unwrap();
        c2.write_all(&[3, 0]).await.unwrap();
        let mut session = GameSession::new(s1, s2);
        assert!(session.play(&mut FixedDeck::ordered()).await.is_err());
        assert_eq!(session.phase, Phase::Handshake);

        // One good round, then p2 plays a card from p1's hand.
        let (mut c1, mut c2, s1, s2) = pipes();
        c1.write_all(&[0, 0, 2, 0, 2, 1]).await.unwrap();
        c2.write_all(&[0, 0, 2, 26, 2, 5]).await.unwrap();
        let mut session = GameSession::new(s1, s2);
        let err = session.play(&mut FixedDeck::ordered()).await.unwrap_err();
        assert_eq!(err.kind(), FaultKind::CardViolation);
        assert_eq!(session.phase, Phase::Round(2));
        assert_eq!(session.phase.to_string(), "round 2");
        assert_eq!(session.rounds_played, 1);
    }
}
