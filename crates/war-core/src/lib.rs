//! # war-core
//!
//! Shared library for the War card game server and client containing the
//! network protocol codec and the card domain: cards, hands, the rank
//! comparator, and the deck dealer.
//!
//! This crate is used by both the server and client applications.
//! It has zero dependencies on network sockets or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! War is a two-player card game.  The server shuffles a 52-card deck, deals
//! 26 cards to each player, and then asks both players to play one card per
//! round for 26 rounds.  The higher rank wins the round; equal ranks draw.
//!
//! - **`protocol`** – How bytes travel over the network.  Every message is a
//!   one-byte opcode followed by a fixed-size payload, decoded into the
//!   typed [`WarMessage`] enum on the other end.
//!
//! - **`domain`** – Pure game rules with no I/O: the [`Card`] type and its
//!   rank comparator, [`Hand`] and [`PlayedSet`] validation, and the
//!   [`Dealer`] that shuffles and splits the deck.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `war_core::Card` instead of `war_core::domain::card::Card`.
pub use domain::card::{
    compare, compare_cards, Card, CardError, Hand, PlayedSet, DECK_SIZE, HAND_SIZE, RANKS,
};
pub use domain::deck::{deal_ordered, Dealer, DeckSource, FixedDeck};
pub use protocol::codec::{decode_expected, decode_message, encode_message, ProtocolError};
pub use protocol::messages::{Opcode, PlayOutcome, WarMessage};
