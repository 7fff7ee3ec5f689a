//! Deck dealing.
//!
//! Every game starts by shuffling all 52 cards and splitting the result into
//! two contiguous halves: the first 26 go to peer 1, the rest to peer 2.
//!
//! The shuffle is a full Fisher–Yates pass (`SliceRandom::shuffle`), so every
//! one of the 52! orderings is equally likely.  Dealing only part of the deck
//! or swapping a fixed number of pairs would bias the hands.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::domain::card::{Card, Hand, DECK_SIZE, HAND_SIZE};

/// Anything that can produce the two starting hands of a game.
///
/// The server's game session only depends on this trait, which lets tests
/// drive a session with a known deck.
pub trait DeckSource {
    /// Returns `(peer1_hand, peer2_hand)`.
    fn deal(&mut self) -> (Hand, Hand);
}

/// Shuffling dealer backed by a ChaCha8 stream.
#[derive(Debug, Clone)]
pub struct Dealer {
    rng: ChaCha8Rng,
}

impl Dealer {
    /// Seeds the dealer from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reproducible dealer; the same seed always deals the same hands.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl DeckSource for Dealer {
    fn deal(&mut self) -> (Hand, Hand) {
        let mut deck = full_deck();
        deck.shuffle(&mut self.rng);
        trace!("shuffled deck, top card {}", deck[0]);
        split(deck)
    }
}

/// Always deals the same two hands.
#[derive(Debug, Clone)]
pub struct FixedDeck {
    p1: Hand,
    p2: Hand,
}

impl FixedDeck {
    pub fn new(p1: Hand, p2: Hand) -> Self {
        Self { p1, p2 }
    }

    /// The unshuffled deck: peer 1 gets `0..26`, peer 2 gets `26..52`.
    pub fn ordered() -> Self {
        let (p1, p2) = deal_ordered();
        Self { p1, p2 }
    }
}

impl DeckSource for FixedDeck {
    fn deal(&mut self) -> (Hand, Hand) {
        (self.p1.clone(), self.p2.clone())
    }
}

/// Splits an unshuffled deck into `0..26` and `26..52`.
pub fn deal_ordered() -> (Hand, Hand) {
    split(full_deck())
}

fn full_deck() -> Vec<Card> {
    // DECK_SIZE is 52, so every index is a valid card byte.
    (0..DECK_SIZE as u8).filter_map(|v| Card::new(v).ok()).collect()
}

fn split(mut deck: Vec<Card>) -> (Hand, Hand) {
    let second = deck.split_off(HAND_SIZE);
    (Hand::from_unique(deck), Hand::from_unique(second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn covers_whole_deck(p1: &Hand, p2: &Hand) -> bool {
        let mut seen = [false; DECK_SIZE];
        for c in p1.cards().iter().chain(p2.cards()) {
            seen[usize::from(c.value())] = true;
        }
        seen.iter().all(|&s| s)
    }

    #[test]
    fn test_deal_ordered_splits_deck_in_half() {
        let (p1, p2) = deal_ordered();
        assert_eq!(p1.to_bytes(), (0..26).collect::<Vec<u8>>());
        assert_eq!(p2.to_bytes(), (26..52).collect::<Vec<u8>>());
    }

    #[test]
    fn test_seeded_dealer_is_reproducible() {
        let a = Dealer::seeded(7).deal();
        let b = Dealer::seeded(7).deal();
        assert_eq!(a, b);
    }

    #[test]
    fn test_successive_deals_differ() {
        let mut dealer = Dealer::seeded(11);
        let first = dealer.deal();
        let second = dealer.deal();
        assert_ne!(first, second);
    }

    #[test]
    fn test_fixed_deck_repeats_its_hands() {
        let mut deck = FixedDeck::ordered();
        assert_eq!(deck.deal(), deal_ordered());
        assert_eq!(deck.deal(), deal_ordered());
    }

    #[test]
    fn test_shuffle_moves_every_card_somewhere() {
        // Over many deals each card should land in both hands at least once.
        let mut dealer = Dealer::seeded(3);
        let mut in_p1 = [false; DECK_SIZE];
        let mut in_p2 = [false; DECK_SIZE];
        for _ in 0..200 {
            let (p1, p2) = dealer.deal();
            for c in p1.cards() {
                in_p1[usize::from(c.value())] = true;
            }
            for c in p2.cards() {
                in_p2[usize::from(c.value())] = true;
            }
        }
        assert!(in_p1.iter().all(|&s| s));
        assert!(in_p2.iter().all(|&s| s));
    }

    proptest! {
        #[test]
        fn prop_deal_partitions_the_deck(seed in any::<u64>()) {
            let (p1, p2) = Dealer::seeded(seed).deal();
            prop_assert_eq!(p1.cards().len(), HAND_SIZE);
            prop_assert_eq!(p2.cards().len(), HAND_SIZE);
            prop_assert!(p1.is_disjoint(&p2));
            prop_assert!(covers_whole_deck(&p1, &p2));
        }
    }
}
