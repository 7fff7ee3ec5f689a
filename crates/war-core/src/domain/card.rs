//! Cards, hands, and the per-peer record of cards already played.
//!
//! # Card encoding (for beginners)
//!
//! A standard deck has 52 cards.  On the wire each card is a single byte in
//! the range `0..=51`:
//!
//! ```text
//! value = suit * 13 + rank
//! rank  = value % 13     (0 = lowest, 12 = highest)
//! suit  = value / 13     (0..=3, never compared)
//! ```
//!
//! War only ever compares ranks, so the cards `0`, `13`, `26` and `39` all
//! tie with each other.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Number of cards dealt to each peer.
pub const HAND_SIZE: usize = 26;

/// Number of distinct ranks; a card's rank is its value modulo this.
pub const RANKS: u8 = 13;

/// Errors raised when building cards or hands from untrusted bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    /// The byte does not name one of the 52 cards.
    #[error("card value {0} is outside 0..=51")]
    OutOfRange(u8),

    /// A hand must contain exactly [`HAND_SIZE`] cards.
    #[error("hand must hold {HAND_SIZE} cards, got {0}")]
    WrongHandSize(usize),

    /// The same card appears twice in one hand.
    #[error("card {0} appears more than once in the hand")]
    Duplicate(u8),
}

// ── Card ──────────────────────────────────────────────────────────────────────

/// A single playing card, guaranteed to be in `0..=51`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Validates `value` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::OutOfRange`] for values above 51.
    pub fn new(value: u8) -> Result<Self, CardError> {
        if usize::from(value) < DECK_SIZE {
            Ok(Self(value))
        } else {
            Err(CardError::OutOfRange(value))
        }
    }

    /// The raw wire byte.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Rank in `0..13`; the only quantity War compares.
    pub fn rank(self) -> u8 {
        self.0 % RANKS
    }

    /// Suit in `0..4`.
    pub fn suit(self) -> u8 {
        self.0 / RANKS
    }

    /// Bit for this card in a 52-bit membership mask.
    fn bit(self) -> u64 {
        1u64 << self.0
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::new(value)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (rank {})", self.0, self.rank())
    }
}

// ── Comparator ────────────────────────────────────────────────────────────────

/// Orders two cards by rank alone.
///
/// ```rust
/// use std::cmp::Ordering;
/// use war_core::domain::card::{compare, Card};
///
/// let ace_of_clubs = Card::new(12).unwrap();
/// let two_of_spades = Card::new(39).unwrap();
/// assert_eq!(compare(ace_of_clubs, two_of_spades), Ordering::Greater);
/// ```
pub fn compare(a: Card, b: Card) -> Ordering {
    a.rank().cmp(&b.rank())
}

/// Same as [`compare`] but as the signed integer `-1`, `0` or `1`.
pub fn compare_cards(a: Card, b: Card) -> i8 {
    match compare(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

// ── Hand ──────────────────────────────────────────────────────────────────────

/// The 26 cards dealt to one peer, in dealt order.
///
/// A `Hand` can only be built through [`Hand::try_from`], which rejects the
/// wrong size and repeated cards, so every `Hand` in the program is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    mask: u64,
}

impl Hand {
    /// Builds a hand from cards the caller already knows are unique,
    /// such as one half of a shuffled deck.
    pub(crate) fn from_unique(cards: Vec<Card>) -> Self {
        debug_assert_eq!(cards.len(), HAND_SIZE);
        let mask = cards.iter().fold(0u64, |m, c| m | c.bit());
        debug_assert_eq!(mask.count_ones() as usize, cards.len());
        Self { cards, mask }
    }

    /// Cards in the order they were dealt.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether `card` was dealt into this hand.
    pub fn contains(&self, card: Card) -> bool {
        self.mask & card.bit() != 0
    }

    /// Raw wire bytes of the hand, in dealt order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cards.iter().map(|c| c.value()).collect()
    }

    /// Whether the two hands share no card.
    pub fn is_disjoint(&self, other: &Hand) -> bool {
        self.mask & other.mask == 0
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = CardError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        if cards.len() != HAND_SIZE {
            return Err(CardError::WrongHandSize(cards.len()));
        }
        let mut mask = 0u64;
        for card in &cards {
            if mask & card.bit() != 0 {
                return Err(CardError::Duplicate(card.value()));
            }
            mask |= card.bit();
        }
        Ok(Self { cards, mask })
    }
}

impl TryFrom<&[u8]> for Hand {
    type Error = CardError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let cards = bytes
            .iter()
            .map(|&b| Card::new(b))
            .collect::<Result<Vec<_>, _>>()?;
        Hand::try_from(cards)
    }
}

// ── PlayedSet ─────────────────────────────────────────────────────────────────

/// Cards one peer has already submitted during the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayedSet {
    mask: u64,
}

impl PlayedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `card` was already played.
    pub fn contains(&self, card: Card) -> bool {
        self.mask & card.bit() != 0
    }

    /// Records `card`; returns `false` if it had already been played.
    pub fn record(&mut self, card: Card) -> bool {
        if self.contains(card) {
            return false;
        }
        self.mask |= card.bit();
        true
    }

    /// Number of cards played so far.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
