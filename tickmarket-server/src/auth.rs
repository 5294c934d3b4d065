//! Token issuing and verification.
//!
//! The engine treats session ids as opaque strings. Whatever mints them lives
//! here, behind [`TokenIssuer`], so the signing scheme and key stay out of the
//! core and can be swapped by configuration.

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tickmarket_core::SessionId;

use crate::config::{AuthConfig, AuthScheme, ConfigError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("cannot issue token: {0}")]
    Issue(String),
}

/// Mints session tokens and checks presented ones.
pub trait TokenIssuer: Send + Sync {
    /// Human-readable scheme name, for logs.
    fn name(&self) -> &str;

    /// New token for `subject` (the client's host). Distinct on every call.
    fn issue(&self, subject: &str) -> Result<String, AuthError>;

    /// Check that `token` was minted by this issuer.
    fn verify(&self, token: &str) -> Result<(), AuthError>;
}

/// JWT claims carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub jti: String,
}

/// HS256 JWTs signed with a configured secret.
pub struct JwtIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Sessions live for the process lifetime: no exp claim to check.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

impl TokenIssuer for JwtIssuer {
    fn name(&self) -> &str {
        "jwt"
    }

    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: chrono::Utc::now().timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Issue(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<(), AuthError> {
        self.decode(token).map(|_| ())
    }
}

/// Random tokens with no structure. Any non-empty token passes `verify`;
/// the session directory decides whether it means anything.
pub struct OpaqueIssuer;

impl TokenIssuer for OpaqueIssuer {
    fn name(&self) -> &str {
        "opaque"
    }

    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        Ok(SessionId::generate(subject).0)
    }

    fn verify(&self, token: &str) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken("empty token".into()));
        }
        Ok(())
    }
}

/// Build the issuer selected by config.
pub fn build_issuer(config: &AuthConfig) -> Result<Arc<dyn TokenIssuer>, ConfigError> {
    match config.scheme {
        AuthScheme::Jwt => {
            let secret = config
                .secret
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or(ConfigError::MissingSecret)?;
            Ok(Arc::new(JwtIssuer::new(secret.as_bytes())))
        }
        AuthScheme::Opaque => Ok(Arc::new(OpaqueIssuer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_round_trip() {
        let issuer = JwtIssuer::new(b"test-secret");
        let token = issuer.issue("127.0.0.1:8484").unwrap();
        issuer.verify(&token).unwrap();
        assert_eq!(issuer.decode(&token).unwrap().sub, "127.0.0.1:8484");
    }

    #[test]
    fn jwt_tokens_are_unique_per_login() {
        let issuer = JwtIssuer::new(b"test-secret");
        assert_ne!(issuer.issue("host").unwrap(), issuer.issue("host").unwrap());
    }

    #[test]
    fn jwt_rejects_foreign_signature() {
        let ours = JwtIssuer::new(b"ours");
        let theirs = JwtIssuer::new(b"theirs");
        let token = theirs.issue("host").unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::InvalidToken(_))));
        assert!(ours.verify("not-a-jwt").is_err());
    }

    #[test]
    fn opaque_accepts_any_non_empty() {
        let issuer = OpaqueIssuer;
        let token = issuer.issue("host").unwrap();
        assert!(issuer.verify(&token).is_ok());
        assert!(issuer.verify("").is_err());
    }

    #[test]
    fn build_issuer_needs_secret_for_jwt() {
        let config = AuthConfig { scheme: AuthScheme::Jwt, secret: None };
        assert!(matches!(build_issuer(&config), Err(ConfigError::MissingSecret)));

        let config = AuthConfig { scheme: AuthScheme::Jwt, secret: Some("k".into()) };
        assert_eq!(build_issuer(&config).unwrap().name(), "jwt");

        let config = AuthConfig { scheme: AuthScheme::Opaque, secret: None };
        assert_eq!(build_issuer(&config).unwrap().name(), "opaque");
    }
}
