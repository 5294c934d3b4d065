//! Bearer-token extractor for the authenticated routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use tickmarket_core::SessionId;

use crate::auth::AuthError;
use crate::error::AppError;
use crate::state::AppState;

/// Session id taken from `Authorization: Bearer <token>` and checked by the issuer.
///
/// A token that verifies but has no ledger is still let through here; the engine
/// answers `Unauthorized` for it.
#[derive(Debug, Clone)]
pub struct BearerSession(pub SessionId);

impl FromRequestParts<AppState> for BearerSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;
        state.issuer.verify(token)?;
        Ok(BearerSession(SessionId::new(token)))
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
