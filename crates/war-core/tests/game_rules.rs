//! Integration tests for the war-core public API.
//!
//! These tests exercise the dealer, comparator and codec together, the way
//! the server uses them at the start of every game.

use war_core::{
    compare_cards, deal_ordered, decode_message, encode_message, Card, Dealer, DeckSource,
    PlayOutcome, WarMessage, DECK_SIZE,
};

fn card(v: u8) -> Card {
    Card::new(v).expect("valid card")
}

#[test]
fn test_ordered_deal_scenario_matches_rank_rule() {
    let (p1, p2) = deal_ordered();

    // Both hands hold ranks 0..=12 twice over.
    assert_eq!(p1.cards()[0].rank(), 0);
    assert_eq!(p1.cards()[12].rank(), 12);
    assert_eq!(p1.cards()[13].rank(), 0);
    assert_eq!(p2.cards()[0].value(), 26);

    // Card 0 vs card 26: both rank 0, a draw.
    assert_eq!(compare_cards(card(0), card(26)), 0);
    // Card 12 (rank 12) vs card 26 (rank 0): peer 1 wins.
    assert_eq!(compare_cards(card(12), card(26)), 1);
}

#[test]
fn test_dealt_hands_survive_the_wire() {
    let (p1, p2) = Dealer::seeded(2024).deal();

    let mut seen = [0u8; DECK_SIZE];
    for hand in [&p1, &p2] {
        let bytes = encode_message(&WarMessage::GameStart(hand.clone()));
        let (decoded, consumed) = decode_message(&bytes).expect("decode must succeed");
        assert_eq!(consumed, 27);
        assert_eq!(decoded, WarMessage::GameStart(hand.clone()));
        for b in &bytes[1..] {
            seen[usize::from(*b)] += 1;
        }
    }

    assert!(seen.iter().all(|&n| n == 1), "every card dealt exactly once");
}

#[test]
fn test_result_pair_is_always_consistent() {
    for a in 0..DECK_SIZE as u8 {
        for b in 0..DECK_SIZE as u8 {
            let p1 = match compare_cards(card(a), card(b)) {
                1 => PlayOutcome::Win,
                0 => PlayOutcome::Draw,
                _ => PlayOutcome::Lose,
            };
            let p2 = match compare_cards(card(b), card(a)) {
                1 => PlayOutcome::Win,
                0 => PlayOutcome::Draw,
                _ => PlayOutcome::Lose,
            };
            assert_eq!(p1.opposite(), p2, "cards {a} vs {b}");
        }
    }
}
