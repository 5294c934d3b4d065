//! Records produced by the engine: pulled prices and executed actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::SessionId;
use super::market::MarketId;

/// One historical price point returned by a pull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pull {
    pub market: MarketId,
    pub position: usize,
    pub value: f64,
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Buy,
    Sell,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Buy => "buy",
            Verb::Sell => "sell",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Verb::Buy),
            "sell" => Ok(Verb::Sell),
            other => Err(other.to_string()),
        }
    }
}

/// Result of an executed buy or sell. Returned to the caller, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub session: SessionId,
    pub market: MarketId,
    pub verb: Verb,
    pub quantity: u64,
    /// Price of one unit at the tick the action executed on.
    pub unit_price: f64,
    /// Total: `unit_price * quantity`.
    pub price: f64,
    /// Series position the price was read from.
    pub position: usize,
    pub executed_at: DateTime<Utc>,
}

/// Point-in-time view of one market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub market: MarketId,
    pub position: usize,
    pub length: usize,
    pub price: f64,
}
