//! HTTP front end for the tickmarket engine.
//!
//! - [`app`]: router and serve loop
//! - [`auth`]: token issuers (JWT or opaque)
//! - [`config`]: TOML config with environment overrides
//! - [`error`]: engine/auth errors as HTTP responses
//! - [`routes`]: handlers

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod params;
pub mod routes;
pub mod state;

pub use app::{create_app, serve};
pub use auth::{build_issuer, AuthError, JwtIssuer, OpaqueIssuer, TokenIssuer};
pub use config::{AppConfig, AuthConfig, AuthScheme, ConfigError, ServerConfig};
pub use error::{AppError, AppResult};
pub use state::AppState;
