//! HTTP handlers, grouped by concern.

pub mod health;
pub mod market;
pub mod session;
