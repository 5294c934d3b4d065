//! tickmarket core: simulated markets, tick advancer, per-session ledgers.
//!
//! This crate is the whole engine; the web layer only calls into it:
//! - Domain types (market ids, session ids, ledgers, pulls, actions)
//! - Price-series loading and the in-memory store with one atomic tick pointer per market
//! - Background tick advancer with a cancellation handle
//! - Session directory with one lock per ledger
//! - `MarketEngine`: `pull`, `execute`/`buy`/`sell`, session create/open/reset

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;

pub use config::{EngineSettings, FileOrder, MarketPaths, ResetPolicy};
pub use data::{LoadError, MarketState};
pub use domain::{Action, LedgerSnapshot, MarketId, MarketStatus, Pull, SessionId, Verb};
pub use engine::{EngineError, MarketEngine, TickHandle};
