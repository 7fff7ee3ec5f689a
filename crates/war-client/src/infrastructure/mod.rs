//! Infrastructure layer for the client.
//!
//! - **`network`** – The TCP peer: connects to the server, plays one full
//!   game following the protocol, and returns a [`network::GameSummary`].

pub mod network;
