//! Market identifiers: the fixed set of tradable instruments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four simulated markets.
///
/// The discriminant is the wire-level market id (`marketplace_id=0` is crypto).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketId {
    Crypto = 0,
    Forex = 1,
    Raw = 2,
    Stock = 3,
}

impl MarketId {
    pub const COUNT: usize = 4;

    pub const ALL: [MarketId; MarketId::COUNT] =
        [MarketId::Crypto, MarketId::Forex, MarketId::Raw, MarketId::Stock];

    /// Array slot for per-market storage.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Resolve a wire-level id. Anything outside `[0, COUNT)` is `None`.
    pub fn from_index(id: i64) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            MarketId::Crypto => "crypto",
            MarketId::Forex => "forex",
            MarketId::Raw => "raw",
            MarketId::Stock => "stock",
        }
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarketId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown market '{s}'"))
    }
}
