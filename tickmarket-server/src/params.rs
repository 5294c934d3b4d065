//! Parsing of the `key=value&key=value` path segments used by the group routes.
//!
//! The parameters live in the path itself (`/group/pull/marketplace_id=0&count=3`),
//! not in a query string, so axum captures the whole segment and it is split here.

use crate::error::AppError;

/// Parameters of `GET /group/pull/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullParams {
    pub market: i64,
    /// `None` when absent or not an integer; the engine defaults it to 0.
    pub count: Option<i64>,
    /// `None` when absent or not an integer; the engine defaults it to the current position.
    pub index: Option<i64>,
}

/// Parameters of `GET /group/{action}/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionParams {
    pub market: i64,
    pub quantity: i64,
}

impl PullParams {
    pub fn parse(segment: &str) -> Result<Self, AppError> {
        let mut market = None;
        let mut count = None;
        let mut index = None;
        for (key, value) in pairs(segment)? {
            match key {
                "marketplace_id" => market = Some(integer(key, value)?),
                "count" => count = value.parse().ok(),
                "index" => index = value.parse().ok(),
                other => return Err(unknown_key(other)),
            }
        }
        Ok(Self {
            market: market.ok_or_else(|| missing("marketplace_id"))?,
            count,
            index,
        })
    }
}

impl ActionParams {
    pub fn parse(segment: &str) -> Result<Self, AppError> {
        let mut market = None;
        let mut quantity = None;
        for (key, value) in pairs(segment)? {
            match key {
                "marketplace_id" => market = Some(integer(key, value)?),
                "quantity" => quantity = Some(integer(key, value)?),
                other => return Err(unknown_key(other)),
            }
        }
        Ok(Self {
            market: market.ok_or_else(|| missing("marketplace_id"))?,
            quantity: quantity.ok_or_else(|| missing("quantity"))?,
        })
    }
}

fn pairs(segment: &str) -> Result<Vec<(&str, &str)>, AppError> {
    segment
        .split('&')
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| AppError::BadRequest(format!("malformed parameter '{pair}'")))
        })
        .collect()
}

fn integer(key: &str, value: &str) -> Result<i64, AppError> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{key} must be an integer, got '{value}'")))
}

fn missing(key: &str) -> AppError {
    AppError::BadRequest(format!("missing {key}"))
}

fn unknown_key(key: &str) -> AppError {
    AppError::BadRequest(format!("unknown parameter '{key}'"))
}
