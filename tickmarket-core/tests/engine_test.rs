//! End-to-end engine tests: load from disk, tick, pull, buy, sell.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tickmarket_core::engine::tick_once;
use tickmarket_core::{
    EngineError, EngineSettings, FileOrder, LoadError, MarketEngine, MarketId, MarketPaths,
    MarketState, Pull, Verb,
};

fn write_market(root: &Path, market: MarketId, files: &[(&str, &str)]) {
    let dir = root.join(market.name());
    fs::create_dir_all(&dir).unwrap();
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn fixture() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    write_market(root.path(), MarketId::Crypto, &[("0001.txt", "10\n20\n"), ("0002.txt", "30\n")]);
    write_market(root.path(), MarketId::Forex, &[("rates", "1.10\n1.12\n1.09\n")]);
    write_market(root.path(), MarketId::Raw, &[("oil", "70.5\n")]);
    write_market(root.path(), MarketId::Stock, &[("a", "100\n101\n"), ("b", "102\n103\n")]);
    root
}

fn load_engine(root: &Path) -> MarketEngine {
    let state = MarketState::load(&MarketPaths::under(root), FileOrder::Name).unwrap();
    MarketEngine::new(Arc::new(state), EngineSettings::default())
}

#[test]
fn loads_series_across_files() {
    let root = fixture();
    let engine = load_engine(root.path());
    let state = engine.state();

    assert_eq!(state.length(MarketId::Crypto), 3);
    assert_eq!(state.length(MarketId::Forex), 3);
    assert_eq!(state.length(MarketId::Raw), 1);
    assert_eq!(state.length(MarketId::Stock), 4);
    assert_eq!(state.get(MarketId::Crypto, 2).unwrap(), 30.0);
    assert_eq!(state.get(MarketId::Stock, 2).unwrap(), 102.0);
}

#[test]
fn crypto_scenario() {
    let root = fixture();
    let engine = load_engine(root.path());
    let session = engine.create_session("127.0.0.1:8484");

    assert_eq!(
        engine.pull(0, Some(0), Some(0)).unwrap(),
        vec![Pull { market: MarketId::Crypto, position: 0, value: 10.0 }]
    );

    tick_once(engine.state());
    assert_eq!(engine.state().current_position(MarketId::Crypto), 1);

    let action = engine.execute(&session, 0, "buy", 5).unwrap();
    assert_eq!(action.verb, Verb::Buy);
    assert_eq!(action.unit_price, 20.0);
    assert_eq!(action.price, 100.0);

    let ledger = engine.ledger(&session).unwrap();
    assert_eq!(ledger.cash, 9_900.0);
    assert_eq!(ledger.holdings[&MarketId::Crypto], 5);

    let err = engine.execute(&session, 0, "sell", 10).unwrap_err();
    assert_eq!(
        err,
        EngineError::InsufficientHoldings { market: MarketId::Crypto, held: 5, requested: 10 }
    );
    assert_eq!(engine.ledger(&session).unwrap(), ledger);
}

#[test]
fn buy_beyond_cash_is_rejected() {
    let root = fixture();
    let engine = load_engine(root.path());
    let session = engine.create_session("host");

    // 101 * 100 = 10_100 > 10_000
    let err = engine.execute(&session, 3, "buy", 101).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds { .. }));
    assert_eq!(engine.ledger(&session).unwrap().cash, 10_000.0);

    // exactly affordable
    engine.execute(&session, 3, "buy", 100).unwrap();
    assert_eq!(engine.ledger(&session).unwrap().cash, 0.0);
}

#[test]
fn sell_credits_at_current_price() {
    let root = fixture();
    let engine = load_engine(root.path());
    let session = engine.create_session("host");

    engine.execute(&session, 3, "buy", 10).unwrap(); // 10 @ 100
    tick_once(engine.state());
    let action = engine.execute(&session, 3, "sell", 4).unwrap(); // 4 @ 101

    assert_eq!(action.price, 404.0);
    let ledger = engine.ledger(&session).unwrap();
    assert_eq!(ledger.cash, 10_000.0 - 1_000.0 + 404.0);
    assert_eq!(ledger.holdings[&MarketId::Stock], 6);
}

#[test]
fn pull_history_after_ticks() {
    let root = fixture();
    let engine = load_engine(root.path());
    for _ in 0..10 {
        tick_once(engine.state());
    }

    let stock = engine.pull(3, Some(3), None).unwrap();
    let values: Vec<f64> = stock.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![100.0, 101.0, 102.0, 103.0]);

    // single-price market never moves
    assert_eq!(engine.pull(2, None, None).unwrap()[0].position, 0);
    assert!(matches!(engine.pull(2, Some(1), None), Err(EngineError::InvalidRequest(_))));
}

#[test]
fn unparsable_line_fails_startup() {
    let root = fixture();
    write_market(root.path(), MarketId::Forex, &[("zz_broken", "1.0\nN/A\n")]);
    let err = MarketState::load(&MarketPaths::under(root.path()), FileOrder::Name).unwrap_err();
    match err {
        LoadError::Parse { line, value, .. } => {
            assert_eq!(line, 2);
            assert_eq!(value, "N/A");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn missing_market_directory_fails_startup() {
    let root = fixture();
    fs::remove_dir_all(root.path().join("raw")).unwrap();
    let err = MarketState::load(&MarketPaths::under(root.path()), FileOrder::Name).unwrap_err();
    assert!(matches!(err, LoadError::ReadDir { .. }));
}

#[test]
fn empty_market_directory_fails_startup() {
    let root = fixture();
    fs::remove_dir_all(root.path().join("stock")).unwrap();
    fs::create_dir(root.path().join("stock")).unwrap();
    let err = MarketState::load(&MarketPaths::under(root.path()), FileOrder::Name).unwrap_err();
    assert!(matches!(err, LoadError::EmptySeries { market: MarketId::Stock }));
}
