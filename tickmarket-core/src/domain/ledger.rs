//! Client ledger: a session's cash balance and per-market holdings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::market::MarketId;
use crate::engine::EngineError;

/// Cash + holdings for one session.
///
/// Rejected operations leave the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientLedger {
    pub cash: f64,
    pub holdings: [u64; MarketId::COUNT],
}

impl ClientLedger {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            cash: starting_cash,
            holdings: [0; MarketId::COUNT],
        }
    }

    pub fn holding(&self, market: MarketId) -> u64 {
        self.holdings[market.index()]
    }

    /// Debit `unit_price * quantity` and credit the units. Returns the total.
    pub fn buy(&mut self, market: MarketId, quantity: u64, unit_price: f64) -> Result<f64, EngineError> {
        let total = unit_price * quantity as f64;
        if total > self.cash {
            return Err(EngineError::InsufficientFunds {
                needed: total,
                available: self.cash,
            });
        }
        let slot = &mut self.holdings[market.index()];
        *slot = slot.checked_add(quantity).ok_or_else(|| {
            EngineError::InvalidRequest(format!("holding overflow on {market}"))
        })?;
        self.cash -= total;
        Ok(total)
    }

    /// Remove the units and credit `unit_price * quantity`. Returns the total.
    pub fn sell(&mut self, market: MarketId, quantity: u64, unit_price: f64) -> Result<f64, EngineError> {
        let held = self.holding(market);
        if held < quantity {
            return Err(EngineError::InsufficientHoldings {
                market,
                held,
                requested: quantity,
            });
        }
        let total = unit_price * quantity as f64;
        self.holdings[market.index()] = held - quantity;
        self.cash += total;
        Ok(total)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            cash: self.cash,
            holdings: MarketId::ALL
                .into_iter()
                .map(|m| (m, self.holding(m)))
                .collect(),
        }
    }
}

/// Serializable copy of a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub cash: f64,
    pub holdings: BTreeMap<MarketId, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_holds_nothing() {
        let ledger = ClientLedger::new(10_000.0);
        assert_eq!(ledger.cash, 10_000.0);
        assert!(MarketId::ALL.iter().all(|m| ledger.holding(*m) == 0));
    }

    #[test]
    fn buy_debits_cash_and_credits_units() {
        let mut ledger = ClientLedger::new(10_000.0);
        let total = ledger.buy(MarketId::Crypto, 5, 20.0).unwrap();
        assert_eq!(total, 100.0);
        assert_eq!(ledger.cash, 9_900.0);
        assert_eq!(ledger.holding(MarketId::Crypto), 5);
    }

    #[test]
    fn buy_exactly_all_cash_is_allowed() {
        let mut ledger = ClientLedger::new(100.0);
        ledger.buy(MarketId::Stock, 4, 25.0).unwrap();
        assert_eq!(ledger.cash, 0.0);
    }

    #[test]
    fn rejected_buy_leaves_ledger_untouched() {
        let mut ledger = ClientLedger::new(50.0);
        let before = ledger.clone();
        let err = ledger.buy(MarketId::Forex, 3, 20.0).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientFunds { .. }));
        assert_eq!(ledger, before);
    }

    #[test]
    fn rejected_sell_leaves_ledger_untouched() {
        let mut ledger = ClientLedger::new(1_000.0);
        ledger.buy(MarketId::Raw, 5, 10.0).unwrap();
        let before = ledger.clone();
        let err = ledger.sell(MarketId::Raw, 6, 10.0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientHoldings { held: 5, requested: 6, .. }
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn snapshot_lists_every_market() {
        let mut ledger = ClientLedger::new(1_000.0);
        ledger.buy(MarketId::Stock, 2, 1.5).unwrap();
        let snap = ledger.snapshot();
        assert_eq!(snap.holdings.len(), MarketId::COUNT);
        assert_eq!(snap.holdings[&MarketId::Stock], 2);
        assert_eq!(snap.cash, 997.0);
    }
}
