//! war-client library entry point.
//!
//! Shares one module tree between the binary in `main.rs` and the
//! integration tests in `tests/`.
//!
//! # What does war-client do? (for beginners)
//!
//! A *peer* is one player.  It connects to the server, asks for a game with
//! WANTGAME, receives its 26 dealt cards in GAMESTART, and then plays those
//! cards back one at a time in the order they were dealt.  After each play
//! the server answers with PLAYRESULT (win, draw or lose for that round).
//! The peer never makes a choice; it exists to exercise the server.
//!
//! The binary runs either a single peer (`client`) or many peers at once
//! (`clients`), the latter capped by a counting semaphore so the server is
//! not flooded with connection attempts.

/// Application layer: the load-generating runner.
pub mod application;

/// Infrastructure layer: the TCP peer.
pub mod infrastructure;
