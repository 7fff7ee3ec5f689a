//! All War protocol message types.
//!
//! Every message starts with a one-byte opcode followed by a fixed-size
//! payload.  There is no length prefix: the opcode alone decides how many
//! bytes follow.
//!
//! | Opcode         | Direction     | Payload                   | Total |
//! |----------------|---------------|---------------------------|-------|
//! | `WANTGAME=0`   | peer → server | 1 byte, always 0          | 2     |
//! | `GAMESTART=1`  | server → peer | 26 bytes, the dealt hand  | 27    |
//! | `PLAYCARD=2`   | peer → server | 1 byte, the card played   | 2     |
//! | `PLAYRESULT=3` | server → peer | 1 byte, WIN/DRAW/LOSE     | 2     |

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Hand, HAND_SIZE};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Length of every message except GAMESTART.
pub const SHORT_MESSAGE_LEN: usize = 2;

/// Length of a GAMESTART message: opcode plus a full hand.
pub const GAME_START_LEN: usize = 1 + HAND_SIZE;

// ── Opcodes ───────────────────────────────────────────────────────────────────

/// The first byte of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    WantGame = 0,
    GameStart = 1,
    PlayCard = 2,
    PlayResult = 3,
}

impl Opcode {
    /// Total frame length (opcode byte included) for this opcode.
    pub fn frame_len(self) -> usize {
        match self {
            Opcode::GameStart => GAME_START_LEN,
            Opcode::WantGame | Opcode::PlayCard | Opcode::PlayResult => SHORT_MESSAGE_LEN,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(Opcode::WantGame),
            1 => Ok(Opcode::GameStart),
            2 => Ok(Opcode::PlayCard),
            3 => Ok(Opcode::PlayResult),
            _ => Err(()),
        }
    }
}

// ── Round outcome ─────────────────────────────────────────────────────────────

/// Payload byte of a PLAYRESULT message, from the receiving peer's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayOutcome {
    Win = 0,
    Draw = 1,
    Lose = 2,
}

impl PlayOutcome {
    /// The outcome the other peer sees for the same round.
    pub fn opposite(self) -> Self {
        match self {
            PlayOutcome::Win => PlayOutcome::Lose,
            PlayOutcome::Draw => PlayOutcome::Draw,
            PlayOutcome::Lose => PlayOutcome::Win,
        }
    }
}

impl TryFrom<u8> for PlayOutcome {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0 => Ok(PlayOutcome::Win),
            1 => Ok(PlayOutcome::Draw),
            2 => Ok(PlayOutcome::Lose),
            _ => Err(()),
        }
    }
}

// ── Top-level message enum ────────────────────────────────────────────────────

/// A decoded War protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarMessage {
    /// A peer asks to be dealt into a game.
    WantGame,
    /// The server deals a peer its hand.
    GameStart(Hand),
    /// A peer plays one card from its hand.
    PlayCard(Card),
    /// The server reports one round's result to a peer.
    PlayResult(PlayOutcome),
}

impl WarMessage {
    pub fn opcode(&self) -> Opcode {
        match self {
            WarMessage::WantGame => Opcode::WantGame,
            WarMessage::GameStart(_) => Opcode::GameStart,
            WarMessage::PlayCard(_) => Opcode::PlayCard,
            WarMessage::PlayResult(_) => Opcode::PlayResult,
        }
    }

    /// Encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        self.opcode().frame_len()
    }
}
