//! Network infrastructure for the peer client.
//!
//! A peer plays exactly one game per connection:
//!
//! ```text
//! peer                          server
//!  │── WANTGAME ──────────────────▶│
//!  │◀──────────────── GAMESTART ───│   26 dealt cards
//!  │── PLAYCARD (hand[0]) ────────▶│
//!  │◀─────────────── PLAYRESULT ───│
//!  │            ... 26 rounds ...  │
//!  │── close ─────────────────────▶│
//! ```
//!
//! Cards are played in dealt order.  Any framing fault or early close by the
//! server ends the game with a [`ClientError`].

use std::fmt;
use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;
use war_core::{
    decode_expected, encode_message, Opcode, PlayOutcome, ProtocolError, WarMessage,
};

/// Errors that can end a peer's game early.
#[derive(Debug, Error)]
pub enum ClientError {
    /// TCP connection to the server failed.
    #[error("failed to connect to server at {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    /// A read or write failed, including the server closing mid-game.
    #[error("connection I/O error: {0}")]
    Io(#[from] io::Error),
    /// The server sent a frame that does not fit the protocol.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// How a finished game went overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Won,
    Lost,
    Drew,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Won => "won",
            Verdict::Lost => "lost",
            Verdict::Drew => "drew",
        })
    }
}

/// Round results collected over one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl GameSummary {
    /// Counts one PLAYRESULT.
    pub fn record(&mut self, outcome: PlayOutcome) {
        match outcome {
            PlayOutcome::Win => self.wins += 1,
            PlayOutcome::Draw => self.draws += 1,
            PlayOutcome::Lose => self.losses += 1,
        }
    }

    /// Rounds won minus rounds lost.
    pub fn net_score(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.losses)
    }

    pub fn rounds(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// Won if the net score is positive, lost if negative, drew otherwise.
    pub fn verdict(&self) -> Verdict {
        match self.net_score() {
            n if n > 0 => Verdict::Won,
            n if n < 0 => Verdict::Lost,
            _ => Verdict::Drew,
        }
    }
}

/// Connects to `host:port` and plays one full game.
///
/// # Errors
///
/// [`ClientError::Connect`] if the server is unreachable, otherwise whatever
/// [`play_game_on`] reports.
pub async fn play_game(host: &str, port: u16) -> Result<GameSummary, ClientError> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| ClientError::Connect {
            host: host.to_string(),
            port,
            source,
        })?;
    // Every frame is tiny and answered before the next one is sent.
    stream.set_nodelay(true)?;
    play_game_on(stream).await
}

/// Plays one full game over an already-connected stream, then shuts it down.
///
/// # Errors
///
/// [`ClientError::Io`] if the server closes early or a write fails, and
/// [`ClientError::Protocol`] if the server sends an unexpected frame.
pub async fn play_game_on<S>(mut stream: S) -> Result<GameSummary, ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    send(&mut stream, &WarMessage::WantGame).await?;

    let hand = match receive(&mut stream, Opcode::GameStart).await? {
        WarMessage::GameStart(hand) => hand,
        other => return Err(unexpected(Opcode::GameStart, &other)),
    };
    debug!("dealt {} cards", hand.cards().len());

    let mut summary = GameSummary::default();
    for &card in hand.cards() {
        send(&mut stream, &WarMessage::PlayCard(card)).await?;
        match receive(&mut stream, Opcode::PlayResult).await? {
            WarMessage::PlayResult(outcome) => summary.record(outcome),
            other => return Err(unexpected(Opcode::PlayResult, &other)),
        }
    }

    debug!("game complete, I {}", summary.verdict());
    if let Err(e) = stream.shutdown().await {
        debug!("shutdown after game failed: {e}");
    }
    Ok(summary)
}

fn unexpected(expected: Opcode, found: &WarMessage) -> ClientError {
    ClientError::Protocol(ProtocolError::UnexpectedOpcode {
        expected,
        found: found.opcode(),
    })
}

async fn send<W>(writer: &mut W, msg: &WarMessage) -> Result<(), ClientError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&encode_message(msg)).await?;
    writer.flush().await?;
    Ok(())
}

async fn receive<R>(reader: &mut R, expected: Opcode) -> Result<WarMessage, ClientError>
where
    R: AsyncRead + Unpin,
{
    let mut frame = vec![0u8; expected.frame_len()];
    reader.read_exact(&mut frame).await?;
    Ok(decode_expected(&frame, expected)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
