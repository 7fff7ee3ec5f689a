//! Domain layer: cards, hands, and dealing.
//!
//! Pure game rules with no I/O.  The server's round adjudication and the
//! codec's hand validation are both built on these types.

pub mod card;
pub mod deck;
