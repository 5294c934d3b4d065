//! Criterion benchmarks for tickmarket hot paths.
//!
//! Benchmarks:
//! 1. Pull windows of increasing size
//! 2. Buy/sell round trip on one session
//! 3. One tick over all markets
//! 4. Session lookup with many open sessions

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use tickmarket_core::engine::tick_once;
use tickmarket_core::{EngineSettings, MarketEngine, MarketId, MarketState};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0).collect()
}

fn make_engine(n: usize) -> MarketEngine {
    let state = MarketState::from_series([
        make_series(n),
        make_series(n),
        make_series(n),
        make_series(n),
    ])
    .unwrap();
    MarketEngine::new(Arc::new(state), EngineSettings::default())
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_pull(c: &mut Criterion) {
    let engine = make_engine(10_000);
    for _ in 0..5_000 {
        tick_once(engine.state());
    }

    let mut group = c.benchmark_group("pull");
    for count in [0i64, 100, 1_000, 4_999] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| engine.pull(black_box(0), Some(count), None).unwrap())
        });
    }
    group.finish();
}

fn bench_trade(c: &mut Criterion) {
    let engine = make_engine(1_000);
    let session = engine.create_session("bench");

    c.bench_function("buy_sell_round_trip", |b| {
        b.iter(|| {
            engine.buy(&session, MarketId::Stock, black_box(3)).unwrap();
            engine.sell(&session, MarketId::Stock, black_box(3)).unwrap();
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_once", |b| {
        b.iter_batched(
            || make_engine(64),
            |engine| {
                for _ in 0..64 {
                    tick_once(engine.state());
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_lookup(c: &mut Criterion) {
    let engine = make_engine(16);
    let sessions: Vec<_> = (0..10_000)
        .map(|i| engine.create_session(&format!("host-{i}")))
        .collect();

    c.bench_function("ledger_lookup_10k_sessions", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 7919) % sessions.len();
            engine.ledger(black_box(&sessions[i])).unwrap()
        })
    });
}

criterion_group!(benches, bench_pull, bench_trade, bench_tick, bench_lookup);
criterion_main!(benches);
