//! Round adjudication: the rules of one War game, with no I/O.
//!
//! [`GameState`] is the single owned aggregate for one session.  It holds
//! both hands, the cards each peer has already played, and the running
//! scores.  The network session feeds it one pair of cards per round and
//! forwards whatever it decides.
//!
//! # Validity rules
//!
//! A played card is accepted only if it was dealt to that peer and the peer
//! has not played it before.  Both cards of a round are checked before either
//! is recorded, so a rejected round leaves the state untouched.

use std::fmt;

use thiserror::Error;
use war_core::{compare_cards, Card, Hand, PlayOutcome, PlayedSet, HAND_SIZE};

/// Which side of the session a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peer {
    One,
    Two,
}

impl Peer {
    fn index(self) -> usize {
        match self {
            Peer::One => 0,
            Peer::Two => 1,
        }
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peer::One => f.write_str("p1"),
            Peer::Two => f.write_str("p2"),
        }
    }
}

/// A play that breaks the card rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardViolation {
    /// The card was not dealt to this peer (or is not a card at all).
    #[error("{peer} played card {card}, which is not in its hand")]
    NotInHand { peer: Peer, card: u8 },

    /// The peer already played this card earlier in the game.
    #[error("{peer} replayed card {card}")]
    Replayed { peer: Peer, card: u8 },
}

impl CardViolation {
    pub fn peer(&self) -> Peer {
        match self {
            CardViolation::NotInHand { peer, .. } | CardViolation::Replayed { peer, .. } => *peer,
        }
    }
}

/// What each peer is told about one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub p1: PlayOutcome,
    pub p2: PlayOutcome,
}

impl RoundOutcome {
    /// Applies the rank rule to peer 1's and peer 2's cards.
    pub fn from_cards(p1_card: Card, p2_card: Card) -> Self {
        let p1 = match compare_cards(p1_card, p2_card) {
            1 => PlayOutcome::Win,
            0 => PlayOutcome::Draw,
            _ => PlayOutcome::Lose,
        };
        Self {
            p1,
            p2: p1.opposite(),
        }
    }

    pub fn for_peer(&self, peer: Peer) -> PlayOutcome {
        match peer {
            Peer::One => self.p1,
            Peer::Two => self.p2,
        }
    }
}

/// Per-session game state.
#[derive(Debug, Clone)]
pub struct GameState {
    hands: [Hand; 2],
    played: [PlayedSet; 2],
    scores: [u32; 2],
    rounds: usize,
}

impl GameState {
    pub fn new(p1: Hand, p2: Hand) -> Self {
        Self {
            hands: [p1, p2],
            played: [PlayedSet::new(); 2],
            scores: [0; 2],
            rounds: 0,
        }
    }

    pub fn hand(&self, peer: Peer) -> &Hand {
        &self.hands[peer.index()]
    }

    /// Number of rounds adjudicated so far.
    pub fn rounds_played(&self) -> usize {
        self.rounds
    }

    /// True once all 26 rounds have been played.
    pub fn is_complete(&self) -> bool {
        self.rounds >= HAND_SIZE
    }

    /// Rounds won by `(p1, p2)`.  Informational only; never sent to peers.
    pub fn scores(&self) -> (u32, u32) {
        (self.scores[0], self.scores[1])
    }

    /// Checks that `card` is a legal next play for `peer`.
    ///
    /// # Errors
    ///
    /// [`CardViolation`] if the card is foreign to the peer's hand or replayed.
    pub fn check_play(&self, peer: Peer, card: Card) -> Result<(), CardViolation> {
        let i = peer.index();
        if !self.hands[i].contains(card) {
            return Err(CardViolation::NotInHand {
                peer,
                card: card.value(),
            });
        }
        if self.played[i].contains(card) {
            return Err(CardViolation::Replayed {
                peer,
                card: card.value(),
            });
        }
        Ok(())
    }

    /// Adjudicates one round.
    ///
    /// Peer 1's card is checked first.  Nothing is recorded unless both cards
    /// are legal.
    ///
    /// # Errors
    ///
    /// The first [`CardViolation`] found.
    pub fn play_round(
        &mut self,
        p1_card: Card,
        p2_card: Card,
    ) -> Result<RoundOutcome, CardViolation> {
        self.check_play(Peer::One, p1_card)?;
        self.check_play(Peer::Two, p2_card)?;

        self.played[0].record(p1_card);
        self.played[1].record(p2_card);
        self.rounds += 1;

        let outcome = RoundOutcome::from_cards(p1_card, p2_card);
        match outcome.p1 {
            PlayOutcome::Win => self.scores[0] += 1,
            PlayOutcome::Lose => self.scores[1] += 1,
            PlayOutcome::Draw => {}
        }
        Ok(outcome)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
