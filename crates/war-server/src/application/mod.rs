//! Application layer use cases for the server.
//!
//! # Sub-modules
//!
//! - **`adjudicate`** – The rules of one game: which plays are legal, who
//!   wins each round, and when the game is over.  Contains no network I/O,
//!   so every rule can be tested without a socket.

pub mod adjudicate;
