//! Criterion benchmarks for the War wire codec and deck dealer.
//!
//! Run with:
//! ```bash
//! cargo bench --package war-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use war_core::domain::card::Card;
use war_core::domain::deck::{deal_ordered, Dealer, DeckSource};
use war_core::protocol::codec::{decode_message, encode_message};
use war_core::protocol::messages::{PlayOutcome, WarMessage};

// ── Message fixtures ──────────────────────────────────────────────────────────

fn fixtures() -> Vec<(&'static str, WarMessage)> {
    let (hand, _) = deal_ordered();
    vec![
        ("WantGame", WarMessage::WantGame),
        ("GameStart", WarMessage::GameStart(hand)),
        ("PlayCard", WarMessage::PlayCard(Card::new(17).unwrap())),
        ("PlayResult", WarMessage::PlayResult(PlayOutcome::Win)),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `encode_message` for every message type.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_message");
    for (name, msg) in fixtures() {
        group.bench_with_input(BenchmarkId::new("msg", name), &msg, |b, msg| {
            b.iter(|| encode_message(black_box(msg)))
        });
    }
    group.finish();
}

/// Benchmarks `decode_message` for every message type from pre-encoded bytes.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_message");
    for (name, msg) in fixtures() {
        let bytes = encode_message(&msg);
        group.bench_with_input(BenchmarkId::new("msg", name), &bytes, |b, bytes| {
            b.iter(|| decode_message(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// One shuffle-and-split per game start.
fn bench_deal(c: &mut Criterion) {
    let mut dealer = Dealer::seeded(42);
    c.bench_function("dealer_deal", |b| b.iter(|| dealer.deal()));
}

criterion_group!(benches, bench_encode, bench_decode, bench_deal);
criterion_main!(benches);
