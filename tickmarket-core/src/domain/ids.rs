use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session identifier.
///
/// The engine never interprets the contents: it can be a token minted by
/// [`SessionId::generate`] or one handed over by an external issuer (a JWT, say).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh, unguessable id for `subject`.
    ///
    /// BLAKE3 over the subject, a random 128-bit nonce and the current timestamp,
    /// so two logins from the same host never collide.
    pub fn generate(subject: &str) -> Self {
        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);
        let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();

        let mut hasher = blake3::Hasher::new();
        hasher.update(subject.as_bytes());
        hasher.update(&nonce);
        hasher.update(&now.to_le_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_for_same_subject() {
        let a = SessionId::generate("localhost:8484");
        let b = SessionId::generate("localhost:8484");
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn external_ids_are_kept_verbatim() {
        let id = SessionId::from("eyJhbGciOiJIUzI1NiJ9.x.y");
        assert_eq!(id.to_string(), "eyJhbGciOiJIUzI1NiJ9.x.y");
    }
}
