//! Application layer use cases for the client.
//!
//! - **`load`** – Launches many peers concurrently and counts how many
//!   finished their game.

pub mod load;
