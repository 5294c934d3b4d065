//! Shared handler state.

use std::sync::Arc;
use std::time::Instant;

use tickmarket_core::MarketEngine;

use crate::auth::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MarketEngine>,
    pub issuer: Arc<dyn TokenIssuer>,
    started_at: Instant,
}

impl AppState {
    pub fn new(engine: Arc<MarketEngine>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            engine,
            issuer,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
