//! Credential value objects
//!
//! [`ClientCredentials`] identifies an upstream API identity;
//! [`AccessToken`] is the short-lived bearer obtained by exchanging them.
//! Tokens are owned exclusively by the token manager in the infrastructure
//! layer; adapters borrow one per call and never cache it themselves.

use std::time::{Duration, Instant};

/// Client id/secret pair for an OAuth2 client-credentials exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Identity key for single-flight de-duplication. The secret is not part
    /// of the key and never appears in logs.
    pub fn identity(&self) -> &str {
        &self.client_id
    }
}

/// An opaque bearer token with its validity window
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: String,
    issued_at: Instant,
    expires_in: Duration,
}

impl AccessToken {
    /// Wrap a freshly issued token
    pub fn issued_now(secret: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            secret: secret.into(),
            issued_at: Instant::now(),
            expires_in,
        }
    }

    /// The bearer string to present upstream
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether the token is still usable, requiring at least `leeway` of
    /// remaining validity so a call started now does not outlive it
    pub fn is_fresh(&self, leeway: Duration) -> bool {
        match self.expires_in.checked_sub(self.issued_at.elapsed()) {
            Some(remaining) => remaining > leeway,
            None => false,
        }
    }
}
