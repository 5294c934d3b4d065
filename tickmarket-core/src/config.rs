//! Engine configuration: series locations, starting cash, tick cadence, reset policy.
//!
//! Every field has a default so the surrounding TOML file can omit whole sections.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::MarketId;

/// Directory holding each market's price files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketPaths {
    pub crypto: PathBuf,
    pub forex: PathBuf,
    pub raw: PathBuf,
    pub stock: PathBuf,
}

impl MarketPaths {
    pub fn get(&self, market: MarketId) -> &PathBuf {
        match market {
            MarketId::Crypto => &self.crypto,
            MarketId::Forex => &self.forex,
            MarketId::Raw => &self.raw,
            MarketId::Stock => &self.stock,
        }
    }

    /// All four directories under a common root (`<root>/crypto/`, ...).
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            crypto: root.join(MarketId::Crypto.name()),
            forex: root.join(MarketId::Forex.name()),
            raw: root.join(MarketId::Raw.name()),
            stock: root.join(MarketId::Stock.name()),
        }
    }
}

impl Default for MarketPaths {
    fn default() -> Self {
        Self::under("./indexes")
    }
}

/// Order in which a market directory's files are concatenated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileOrder {
    /// Sorted by file name.
    #[default]
    Name,
    /// Whatever order the filesystem lists entries in.
    Listing,
}

/// What `reset_token` does with the caller's session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Hand out the new token without any ledger behind it. Actions on it fail.
    Unbacked,
    /// Move the caller's ledger to the new token; the old token stops resolving.
    Rotate,
    /// Refuse to reset.
    #[default]
    Reject,
}

/// Runtime knobs of the market engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub starting_cash: f64,
    pub tick_interval_secs: u64,
    pub reset_policy: ResetPolicy,
    pub file_order: FileOrder,
}

impl EngineSettings {
    /// Interval between ticks, never shorter than one second.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            starting_cash: 10_000.0,
            tick_interval_secs: 5,
            reset_policy: ResetPolicy::default(),
            file_order: FileOrder::default(),
        }
    }
}
