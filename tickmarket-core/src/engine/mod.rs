//! Market engine: tick advancer, session directory, pull and buy/sell.

pub mod error;
pub mod market;
pub mod sessions;
pub mod ticker;

pub use error::EngineError;
pub use market::MarketEngine;
pub use sessions::{SessionDirectory, SharedLedger};
pub use ticker::{tick_once, TickAdvancer, TickHandle};
