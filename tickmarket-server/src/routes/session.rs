//! Login, token reset and portfolio.

use axum::extract::State;
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use tickmarket_core::{LedgerSnapshot, SessionId};

use crate::error::AppResult;
use crate::extract::BearerSession;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

fn host(headers: &HeaderMap) -> &str {
    headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
}

/// `GET /login`: issue a token and open a ledger for it.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Json<TokenResponse>> {
    let host = host(&headers);
    let token = state.issuer.issue(host)?;
    state.engine.open_session(SessionId::new(token.clone()));
    info!(host, issuer = state.issuer.name(), "logged in");
    Ok(Json(TokenResponse { token }))
}

/// `GET /reset_token`: exchange the presented token per the configured reset policy.
pub async fn reset_token(
    State(state): State<AppState>,
    BearerSession(session): BearerSession,
    headers: HeaderMap,
) -> AppResult<Json<TokenResponse>> {
    let host = host(&headers);
    let fresh = SessionId::new(state.issuer.issue(host)?);
    let token = state.engine.reset_session(&session, fresh)?;
    info!(host, "token reset");
    Ok(Json(TokenResponse { token: token.0 }))
}

/// `GET /group/portfolio`: cash and holdings of the caller.
pub async fn portfolio(
    State(state): State<AppState>,
    BearerSession(session): BearerSession,
) -> AppResult<Json<LedgerSnapshot>> {
    Ok(Json(state.engine.ledger(&session)?))
}
