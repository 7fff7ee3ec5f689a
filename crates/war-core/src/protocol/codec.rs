//! Binary codec for encoding and decoding War protocol messages.
//!
//! Wire format:
//! ```text
//! [opcode:1][payload:N]      N = 1, or 26 for GAMESTART
//! ```
//! All fields are single bytes, so there is no byte-order concern.

use thiserror::Error;

use crate::domain::card::{Card, CardError, Hand};
use crate::protocol::messages::{Opcode, PlayOutcome, WarMessage};

/// Errors that can occur during message decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the frame the opcode announces.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The opcode byte is not one of the four defined values.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(u8),

    /// A valid opcode arrived where a different one was required.
    #[error("expected {expected:?}, found {found:?}")]
    UnexpectedOpcode { expected: Opcode, found: Opcode },

    /// A card byte is out of range, or a dealt hand is malformed.
    #[error("invalid card: {0}")]
    InvalidCard(#[from] CardError),

    /// The PLAYRESULT payload is not WIN, DRAW or LOSE.
    #[error("unknown play outcome: {0}")]
    UnknownOutcome(u8),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`WarMessage`] into its exact wire bytes.
///
/// # Examples
///
/// ```rust
/// use war_core::protocol::{decode_message, encode_message};
/// use war_core::protocol::messages::{PlayOutcome, WarMessage};
///
/// let msg = WarMessage::PlayResult(PlayOutcome::Draw);
/// let bytes = encode_message(&msg);
/// assert_eq!(bytes, vec![3, 1]);
/// let (decoded, consumed) = decode_message(&bytes).unwrap();
/// assert_eq!(decoded, msg);
/// assert_eq!(consumed, 2);
/// ```
pub fn encode_message(msg: &WarMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(msg.wire_len());
    buf.push(msg.opcode() as u8);
    match msg {
        WarMessage::WantGame => buf.push(0),
        WarMessage::GameStart(hand) => buf.extend(hand.cards().iter().map(|c| c.value())),
        WarMessage::PlayCard(card) => buf.push(card.value()),
        WarMessage::PlayResult(outcome) => buf.push(*outcome as u8),
    }
    buf
}

/// Decodes one [`WarMessage`] from the beginning of `bytes`.
///
/// Returns the decoded message and the number of bytes consumed, so the
/// caller can advance its read cursor.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are truncated or malformed.
pub fn decode_message(bytes: &[u8]) -> Result<(WarMessage, usize), ProtocolError> {
    let first = *bytes.first().ok_or(ProtocolError::InsufficientData {
        needed: 1,
        available: 0,
    })?;
    let opcode = Opcode::try_from(first).map_err(|_| ProtocolError::UnknownOpcode(first))?;
    let len = opcode.frame_len();
    if bytes.len() < len {
        return Err(ProtocolError::InsufficientData {
            needed: len,
            available: bytes.len(),
        });
    }
    let msg = decode_payload(opcode, &bytes[1..len])?;
    Ok((msg, len))
}

/// Decodes one message that must carry the `expected` opcode.
///
/// The opcode is checked before anything else, so a peer that sends the wrong
/// kind of message is reported as such even if the rest of the frame would
/// not have parsed.
///
/// # Errors
///
/// [`ProtocolError::UnknownOpcode`] or [`ProtocolError::UnexpectedOpcode`] for
/// a bad first byte, otherwise whatever [`decode_message`] reports.
pub fn decode_expected(bytes: &[u8], expected: Opcode) -> Result<WarMessage, ProtocolError> {
    if let Some(&first) = bytes.first() {
        let found = Opcode::try_from(first).map_err(|_| ProtocolError::UnknownOpcode(first))?;
        if found != expected {
            return Err(ProtocolError::UnexpectedOpcode { expected, found });
        }
    }
    decode_message(bytes).map(|(msg, _)| msg)
}

// ── Payload decoding ──────────────────────────────────────────────────────────

fn decode_payload(opcode: Opcode, payload: &[u8]) -> Result<WarMessage, ProtocolError> {
    match opcode {
        // The WANTGAME payload byte carries no meaning and is not checked.
        Opcode::WantGame => Ok(WarMessage::WantGame),
        Opcode::GameStart => Ok(WarMessage::GameStart(Hand::try_from(payload)?)),
        Opcode::PlayCard => Ok(WarMessage::PlayCard(Card::new(payload[0])?)),
        Opcode::PlayResult => PlayOutcome::try_from(payload[0])
            .map(WarMessage::PlayResult)
            .map_err(|_| ProtocolError::UnknownOutcome(payload[0])),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
