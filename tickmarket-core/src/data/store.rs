//! PriceSeries store: immutable historical prices plus the live tick pointer.
//!
//! Prices never change after load. The only mutable state is each market's
//! current position, an `AtomicUsize` advanced by the ticker and read by
//! everyone else.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::info;

use crate::config::{FileOrder, MarketPaths};
use crate::data::loader::{load_series, LoadError};
use crate::domain::{MarketId, MarketStatus};
use crate::engine::EngineError;

/// One market's series and its current position.
#[derive(Debug)]
pub struct PriceSeries {
    market: MarketId,
    prices: Vec<f64>,
    position: AtomicUsize,
}

impl PriceSeries {
    /// Wrap a loaded series. Position starts at 0.
    pub fn new(market: MarketId, prices: Vec<f64>) -> Result<Self, LoadError> {
        if prices.is_empty() {
            return Err(LoadError::EmptySeries { market });
        }
        Ok(Self {
            market,
            prices,
            position: AtomicUsize::new(0),
        })
    }

    pub fn market(&self) -> MarketId {
        self.market
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always false: empty series are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn get(&self, position: usize) -> Result<f64, EngineError> {
        self.prices
            .get(position)
            .copied()
            .ok_or(EngineError::OutOfRange {
                market: self.market,
                position,
                len: self.prices.len(),
            })
    }

    pub fn current_position(&self) -> usize {
        self.position.load(Ordering::Acquire)
    }

    /// Current position and the price stored there, from a single load.
    pub fn quote(&self) -> (usize, f64) {
        let position = self.current_position();
        // position < len is maintained by `advance`
        (position, self.prices[position])
    }

    /// Step the position by one unless already at the last price.
    ///
    /// Returns true if the position moved.
    pub fn advance(&self) -> bool {
        let last = self.prices.len() - 1;
        self.position
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |p| {
                (p < last).then_some(p + 1)
            })
            .is_ok()
    }

    /// Raw slice of prices in `[from, to]`, inclusive.
    pub fn window(&self, from: usize, to: usize) -> Result<&[f64], EngineError> {
        if to >= self.prices.len() || from > to {
            return Err(EngineError::OutOfRange {
                market: self.market,
                position: to,
                len: self.prices.len(),
            });
        }
        Ok(&self.prices[from..=to])
    }
}

/// All markets' series, indexed by `MarketId::index()`.
#[derive(Debug)]
pub struct MarketState {
    series: [PriceSeries; MarketId::COUNT],
}

impl MarketState {
    /// Load every market from its directory. The first failure aborts.
    pub fn load(paths: &MarketPaths, order: FileOrder) -> Result<Self, LoadError> {
        let load = |market: MarketId| -> Result<Vec<f64>, LoadError> {
            let dir = paths.get(market);
            let prices = load_series(dir, order)?;
            info!(%market, dir = %dir.display(), prices = prices.len(), "loaded price series");
            Ok(prices)
        };
        Self::from_series([
            load(MarketId::Crypto)?,
            load(MarketId::Forex)?,
            load(MarketId::Raw)?,
            load(MarketId::Stock)?,
        ])
    }

    /// Build from in-memory series, in `MarketId::ALL` order.
    pub fn from_series(series: [Vec<f64>; MarketId::COUNT]) -> Result<Self, LoadError> {
        let [crypto, forex, raw, stock] = series;
        Ok(Self {
            series: [
                PriceSeries::new(MarketId::Crypto, crypto)?,
                PriceSeries::new(MarketId::Forex, forex)?,
                PriceSeries::new(MarketId::Raw, raw)?,
                PriceSeries::new(MarketId::Stock, stock)?,
            ],
        })
    }

    pub fn series(&self, market: MarketId) -> &PriceSeries {
        &self.series[market.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceSeries> {
        self.series.iter()
    }

    pub fn get(&self, market: MarketId, position: usize) -> Result<f64, EngineError> {
        self.series(market).get(position)
    }

    pub fn length(&self, market: MarketId) -> usize {
        self.series(market).len()
    }

    pub fn current_position(&self, market: MarketId) -> usize {
        self.series(market).current_position()
    }

    pub fn quote(&self, market: MarketId) -> (usize, f64) {
        self.series(market).quote()
    }

    pub fn status(&self) -> Vec<MarketStatus> {
        self.series
            .iter()
            .map(|s| {
                let (position, price) = s.quote();
                MarketStatus {
                    market: s.market(),
                    position,
                    length: s.len(),
                    price,
                }
            })
            .collect()
    }
}
