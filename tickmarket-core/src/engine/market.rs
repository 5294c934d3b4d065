//! Market engine: pull, buy/sell and session management on top of the store.
//!
//! Every operation reads a market's current position at most once, so a tick
//! landing mid-request cannot split one request across two prices.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{EngineSettings, ResetPolicy};
use crate::data::MarketState;
use crate::domain::{Action, LedgerSnapshot, MarketId, MarketStatus, Pull, SessionId, Verb};
use crate::engine::sessions::SessionDirectory;
use crate::engine::ticker::{TickAdvancer, TickHandle};
use crate::engine::EngineError;

pub struct MarketEngine {
    state: Arc<MarketState>,
    sessions: SessionDirectory,
    settings: EngineSettings,
}

impl MarketEngine {
    pub fn new(state: Arc<MarketState>, settings: EngineSettings) -> Self {
        Self {
            sessions: SessionDirectory::new(settings.starting_cash),
            state,
            settings,
        }
    }

    pub fn state(&self) -> &Arc<MarketState> {
        &self.state
    }

    pub fn sessions(&self) -> &SessionDirectory {
        &self.sessions
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Start the background ticker over this engine's markets.
    pub fn start_ticker(&self, interval: Duration) -> io::Result<TickHandle> {
        TickAdvancer::new(self.state.clone(), interval).spawn()
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Mint a session id and back it with a fresh ledger.
    pub fn create_session(&self, subject: &str) -> SessionId {
        let id = self.sessions.create(subject);
        info!(subject, sessions = self.sessions.len(), "session created");
        id
    }

    /// Back an externally issued id with a fresh ledger. False if already known.
    pub fn open_session(&self, id: SessionId) -> bool {
        let created = self.sessions.register(id);
        if created {
            info!(sessions = self.sessions.len(), "session opened");
        }
        created
    }

    /// Exchange `old` for `new` according to the configured [`ResetPolicy`].
    pub fn reset_session(&self, old: &SessionId, new: SessionId) -> Result<SessionId, EngineError> {
        match self.settings.reset_policy {
            ResetPolicy::Unbacked => Ok(new),
            ResetPolicy::Rotate => {
                self.sessions.rotate(old, new.clone())?;
                info!("session rotated");
                Ok(new)
            }
            ResetPolicy::Reject => Err(EngineError::ResetRejected),
        }
    }

    pub fn ledger(&self, session: &SessionId) -> Result<LedgerSnapshot, EngineError> {
        Ok(self.sessions.lookup(session)?.lock().snapshot())
    }

    pub fn status(&self) -> Vec<MarketStatus> {
        self.state.status()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Prices at positions `index - count ..= index`, ascending.
    ///
    /// `count` defaults to 0 and `index` to the market's current position.
    pub fn pull(&self, market: i64, count: Option<i64>, index: Option<i64>) -> Result<Vec<Pull>, EngineError> {
        let market = MarketId::from_index(market)
            .ok_or_else(|| EngineError::InvalidRequest(format!("unknown marketplace {market}")))?;
        let series = self.state.series(market);
        let current = series.current_position();

        let count = count.unwrap_or(0);
        let index = index.unwrap_or(current as i64);
        if count < 0 {
            return Err(EngineError::InvalidRequest(format!("negative count {count}")));
        }
        if index < 0 {
            return Err(EngineError::InvalidRequest(format!("negative index {index}")));
        }
        if index > current as i64 {
            return Err(EngineError::InvalidRequest(format!(
                "index {index} is ahead of current position {current}"
            )));
        }
        if index < count {
            return Err(EngineError::InvalidRequest(format!(
                "not enough history: index {index}, count {count}"
            )));
        }

        let (to, from) = (index as usize, (index - count) as usize);
        let pulls: Vec<Pull> = series
            .window(from, to)?
            .iter()
            .zip(from..)
            .map(|(&value, position)| Pull { market, position, value })
            .collect();
        debug!(%market, from, to, "pull");
        Ok(pulls)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Wire-level entry point: validate raw parameters, then buy or sell.
    pub fn execute(&self, session: &SessionId, market: i64, verb: &str, quantity: i64) -> Result<Action, EngineError> {
        let verb: Verb = verb.parse().map_err(EngineError::UnknownAction)?;
        let market = MarketId::from_index(market)
            .ok_or_else(|| EngineError::InvalidRequest(format!("unknown marketplace {market}")))?;
        let quantity = u64::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| EngineError::InvalidRequest(format!("quantity must be positive, got {quantity}")))?;

        match verb {
            Verb::Buy => self.buy(session, market, quantity),
            Verb::Sell => self.sell(session, market, quantity),
        }
    }

    pub fn buy(&self, session: &SessionId, market: MarketId, quantity: u64) -> Result<Action, EngineError> {
        self.trade(session, market, Verb::Buy, quantity)
    }

    pub fn sell(&self, session: &SessionId, market: MarketId, quantity: u64) -> Result<Action, EngineError> {
        self.trade(session, market, Verb::Sell, quantity)
    }

    fn trade(&self, session: &SessionId, market: MarketId, verb: Verb, quantity: u64) -> Result<Action, EngineError> {
        let ledger = self.sessions.lookup(session)?;
        let mut ledger = ledger.lock();

        // Quote taken under the ledger lock, used for both the check and the record.
        let (position, unit_price) = self.state.quote(market);
        let result = match verb {
            Verb::Buy => ledger.buy(market, quantity, unit_price),
            Verb::Sell => ledger.sell(market, quantity, unit_price),
        };
        if let Err(e) = &result {
            warn!(%market, %verb, quantity, error = %e, "action rejected");
        }
        let price = result?;
        debug!(%market, %verb, quantity, position, price, cash = ledger.cash, "action executed");

        Ok(Action {
            session: session.clone(),
            market,
            verb,
            quantity,
            unit_price,
            price,
            position,
            executed_at: Utc::now(),
        })
    }
}
