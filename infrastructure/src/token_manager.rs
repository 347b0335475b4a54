//! Credential/token manager
//!
//! Exchanges client credentials for short-lived bearer tokens and caches the
//! result. The cached slot is a `tokio::sync::Mutex` held across the whole
//! acquisition, which gives single-flight de-duplication for free: concurrent
//! callers for the same credentials serialize on the slot, the first one
//! authenticates, and the rest observe the freshly cached token.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};
use waypoint_domain::auth::{AccessToken, ClientCredentials};
use waypoint_domain::tool::value_objects::ToolError;

use crate::http::{HttpRequest, HttpTransport, TransportError};

/// Refuse to reuse a token with less than this much validity left, so a call
/// started now does not outlive it.
const EXPIRY_LEEWAY: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Manages the bearer token for one upstream API identity
pub struct TokenManager<T: HttpTransport + ?Sized> {
    transport: std::sync::Arc<T>,
    endpoint: String,
    credentials: ClientCredentials,
    slot: tokio::sync::Mutex<Option<AccessToken>>,
}

impl<T: HttpTransport + ?Sized> TokenManager<T> {
    pub fn new(
        transport: std::sync::Arc<T>,
        endpoint: impl Into<String>,
        credentials: ClientCredentials,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            credentials,
            slot: tokio::sync::Mutex::new(None),
        }
    }

    /// Produce a valid token, reusing the cached one while it stays fresh and
    /// re-authenticating transparently once it is not.
    pub async fn get_token(&self) -> Result<AccessToken, ToolError> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_fresh(EXPIRY_LEEWAY) {
                return Ok(token.clone());
            }
            debug!(client = self.credentials.identity(), "Cached token expired");
        }

        let token = self.authenticate().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next `get_token` re-authenticates.
    /// Called by adapters after a 401-class capability response.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    async fn authenticate(&self) -> Result<AccessToken, ToolError> {
        debug!(client = self.credentials.identity(), "Requesting access token");

        let request = HttpRequest::post(&self.endpoint).with_form(vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), self.credentials.client_id.clone()),
            (
                "client_secret".to_string(),
                self.credentials.client_secret.clone(),
            ),
        ]);

        let response = self.transport.execute(&request).await.map_err(|e| match e {
            TransportError::Timeout => ToolError::auth("Token endpoint timed out"),
            other => ToolError::auth(format!("Token endpoint unreachable: {}", other)),
        })?;

        if !response.is_success() {
            warn!(
                client = self.credentials.identity(),
                status = response.status,
                "Credential exchange rejected"
            );
            return Err(ToolError::auth(format!(
                "Credential exchange failed with HTTP {}",
                response.status
            ))
            .with_status(response.status));
        }

        let parsed: TokenResponse = response
            .json()
            .map_err(|e| ToolError::auth(format!("Malformed token response: {}", e)))?;

        Ok(AccessToken::issued_now(
            parsed.access_token,
            Duration::from_secs(parsed.expires_in),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubTransport;
    use crate::http::HttpResponse;
    use std::sync::Arc;

    const TOKEN_URL: &str = "https://auth.example/oauth2/token";

    fn token_body(token: &str, expires_in: u64) -> String {
        format!(r#"{{"access_token":"{}","expires_in":{}}}"#, token, expires_in)
    }

    fn manager(stub: Arc<StubTransport>) -> TokenManager<StubTransport> {
        TokenManager::new(
            stub,
            TOKEN_URL,
            ClientCredentials::new("client-a", "s3cret"),
        )
    }

    #[tokio::test]
    async fn test_token_is_reused_while_fresh() {
        let stub = Arc::new(
            StubTransport::new().respond_json(TOKEN_URL, 200, &token_body("tok-1", 1800)),
        );
        let manager = manager(stub.clone());

        let first = manager.get_token().await.unwrap();
        let second = manager.get_token().await.unwrap();

        assert_eq!(first.secret(), "tok-1");
        assert_eq!(second.secret(), "tok-1");
        assert_eq!(stub.calls_to(TOKEN_URL), 1);
    }

    #[tokio::test]
    async fn test_expired_token_is_reissued() {
        // expires_in below the leeway, so the first token is never reusable
        let stub = Arc::new(StubTransport::new().respond(
            TOKEN_URL,
            vec![
                Ok(HttpResponse::new(200, token_body("tok-1", 5))),
                Ok(HttpResponse::new(200, token_body("tok-2", 1800))),
            ],
        ));
        let manager = manager(stub.clone());

        assert_eq!(manager.get_token().await.unwrap().secret(), "tok-1");
        assert_eq!(manager.get_token().await.unwrap().secret(), "tok-2");
        assert_eq!(stub.calls_to(TOKEN_URL), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reissue() {
        let stub = Arc::new(StubTransport::new().respond(
            TOKEN_URL,
            vec![
                Ok(HttpResponse::new(200, token_body("tok-1", 1800))),
                Ok(HttpResponse::new(200, token_body("tok-2", 1800))),
            ],
        ));
        let manager = manager(stub.clone());

        assert_eq!(manager.get_token().await.unwrap().secret(), "tok-1");
        manager.invalidate().await;
        assert_eq!(manager.get_token().await.unwrap().secret(), "tok-2");
    }

    #[tokio::test]
    async fn test_rejected_credentials_surface_auth_error() {
        let stub = Arc::new(StubTransport::new().respond_json(
            TOKEN_URL,
            401,
            r#"{"error":"invalid_client"}"#,
        ));
        let manager = manager(stub);

        let err = manager.get_token().await.unwrap_err();
        assert_eq!(err.kind, waypoint_domain::ToolErrorKind::Auth);
        assert_eq!(err.status, Some(401));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_single_flight_under_concurrency() {
        // 20 simultaneous callers with an empty cache: exactly one exchange.
        // The delayed response keeps the first acquisition in flight while
        // the others arrive.
        let stub = Arc::new(
            StubTransport::new()
                .respond_json(TOKEN_URL, 200, &token_body("tok-1", 1800))
                .with_delay(Duration::from_millis(50)),
        );
        let manager = Arc::new(manager(stub.clone()));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let manager = manager.clone();
            handles.push(tokio::spawn(async move { manager.get_token().await }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().secret(), "tok-1");
        }

        assert_eq!(stub.calls_to(TOKEN_URL), 1);
    }
}
