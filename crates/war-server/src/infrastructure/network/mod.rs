//! Network infrastructure for the server.
//!
//! # Sub-modules
//!
//! - **`listener`** – Binds the TCP port, accepts connections, and spawns one
//!   task per paired game.
//!
//! - **`pairing`** – FIFO queue where accepted connections wait for an
//!   opponent.
//!
//! - **`session`** – The per-game protocol state machine: handshake, deal,
//!   26 rounds, and teardown on completion or fault.
//!
//! - **`wire`** – Exact-length framed reads and flushed writes on a stream.

pub mod listener;
pub mod pairing;
pub mod session;
pub mod wire;

pub use listener::{serve, serve_on};
pub use pairing::PairingQueue;
pub use session::{FaultKind, GameSession, SessionError, SessionReport};
