//! Price history, buy/sell and market overview.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use tickmarket_core::{MarketStatus, Pull};

use crate::error::AppResult;
use crate::extract::BearerSession;
use crate::params::{ActionParams, PullParams};
use crate::state::AppState;

/// One price point as sent over the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct PullEntry {
    pub marketplace: String,
    pub position: usize,
    pub value: f64,
}

impl From<Pull> for PullEntry {
    fn from(pull: Pull) -> Self {
        Self {
            marketplace: pull.market.name().to_string(),
            position: pull.position,
            value: pull.value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    /// The caller's token.
    pub group: String,
    pub marketplace: usize,
    pub action: String,
    pub quantity: u64,
    /// Total price of the trade.
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarketEntry {
    pub marketplace: String,
    pub position: usize,
    pub length: usize,
    pub price: f64,
}

impl From<MarketStatus> for MarketEntry {
    fn from(status: MarketStatus) -> Self {
        Self {
            marketplace: status.market.name().to_string(),
            position: status.position,
            length: status.length,
            price: status.price,
        }
    }
}

/// `GET /group/pull/marketplace_id={m}[&count={c}[&index={i}]]`
pub async fn pull(
    State(state): State<AppState>,
    BearerSession(_session): BearerSession,
    Path(params): Path<String>,
) -> AppResult<Json<Vec<PullEntry>>> {
    let params = PullParams::parse(&params)?;
    let pulls = state.engine.pull(params.market, params.count, params.index)?;
    Ok(Json(pulls.into_iter().map(PullEntry::from).collect()))
}

/// `GET /group/{buy|sell}/marketplace_id={m}&quantity={q}`
pub async fn action(
    State(state): State<AppState>,
    BearerSession(session): BearerSession,
    Path((verb, params)): Path<(String, String)>,
) -> AppResult<Json<ActionResponse>> {
    let params = ActionParams::parse(&params)?;
    let action = state.engine.execute(&session, params.market, &verb, params.quantity)?;
    Ok(Json(ActionResponse {
        group: action.session.0,
        marketplace: action.market.index(),
        action: action.verb.to_string(),
        quantity: action.quantity,
        price: action.price,
    }))
}

/// `GET /markets`
pub async fn markets(State(state): State<AppState>) -> Json<Vec<MarketEntry>> {
    Json(state.engine.status().into_iter().map(MarketEntry::from).collect())
}
