//! Price data loading and the in-memory series store

pub mod loader;
pub mod store;

pub use loader::{load_series, parse_prices, LoadError};
pub use store::{MarketState, PriceSeries};
