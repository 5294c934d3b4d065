//! Domain types for tickmarket

pub mod ids;
pub mod ledger;
pub mod market;
pub mod trade;

pub use ids::SessionId;
pub use ledger::{ClientLedger, LedgerSnapshot};
pub use market::MarketId;
pub use trade::{Action, MarketStatus, Pull, Verb};
