use thiserror::Error;

use crate::domain::MarketId;

/// Errors returned by engine operations.
///
/// All of them are reported to the caller; none is fatal and none is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Bad pull/action parameters (market id, count, index, quantity).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Session id does not resolve to a ledger.
    #[error("unknown session")]
    Unauthorized,

    #[error("insufficient funds: need {needed:.2}, have {available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("insufficient holdings in {market}: hold {held}, requested {requested}")]
    InsufficientHoldings {
        market: MarketId,
        held: u64,
        requested: u64,
    },

    #[error("{0} unknown")]
    UnknownAction(String),

    /// Internal index misuse. Validation upstream should make this unreachable.
    #[error("position {position} out of range for {market} (length {len})")]
    OutOfRange {
        market: MarketId,
        position: usize,
        len: usize,
    },

    #[error("token reset is disabled")]
    ResetRejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_caller_readable() {
        assert_eq!(EngineError::UnknownAction("hold".into()).to_string(), "hold unknown");
        assert_eq!(
            EngineError::InsufficientFunds { needed: 150.0, available: 99.5 }.to_string(),
            "insufficient funds: need 150.00, have 99.50"
        );
        assert_eq!(
            EngineError::InsufficientHoldings { market: MarketId::Crypto, held: 5, requested: 10 }
                .to_string(),
            "insufficient holdings in crypto: hold 5, requested 10"
        );
    }
}
