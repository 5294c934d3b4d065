//! Liveness probe.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use tickmarket_core::ResetPolicy;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    /// Open sessions.
    pub sessions: usize,
    /// Cash each new session starts with.
    pub starting_cash: f64,
    pub reset_policy: ResetPolicy,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        uptime_secs: state.uptime_secs(),
        sessions: state.engine.sessions().len(),
        starting_cash: state.engine.settings().starting_cash,
        reset_policy: state.engine.settings().reset_policy,
    })
}
