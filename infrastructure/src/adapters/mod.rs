//! Tool adapters, one per external capability
//!
//! Every adapter follows the same shape: validate the request against its
//! declared schema (zero network calls on failure), issue the upstream call
//! through the shared [`HttpTransport`], map failures into the error
//! taxonomy, and normalize the 2xx body into a typed payload with a fixed
//! cardinality cap, preserving upstream ordering.

pub mod flights;
pub mod images;
pub mod rail;
pub mod weather;

pub use flights::FlightSearchAdapter;
pub use images::ImageSearchAdapter;
pub use rail::RailSearchAdapter;
pub use weather::WeatherAdapter;

use std::sync::Arc;

use tracing::debug;
use waypoint_domain::tool::value_objects::ToolError;

use crate::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::token_manager::TokenManager;

/// Cardinality cap for list-shaped payloads
pub(crate) const MAX_ENTRIES: usize = 5;

/// Upstream bodies are truncated to this many bytes in error details
const DETAIL_LIMIT: usize = 256;

/// Truncate an upstream body for inclusion in an error detail
pub(crate) fn truncate_detail(body: &str) -> String {
    if body.len() <= DETAIL_LIMIT {
        return body.to_string();
    }
    let mut end = DETAIL_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}

/// Map a transport-level failure (no response received) to the taxonomy
pub(crate) fn transport_failure(operation: &str, error: TransportError) -> ToolError {
    match error {
        TransportError::Timeout => ToolError::timeout(operation),
        other => ToolError::connectivity(other.to_string()),
    }
}

/// Non-2xx capability response outside the auth-retry path
pub(crate) fn upstream_failure(response: &HttpResponse) -> ToolError {
    ToolError::upstream(response.status, truncate_detail(&response.body))
}

/// Issue an authenticated capability call.
///
/// On a 401/403 response the cached token is invalidated, refreshed, and the
/// call retried exactly once; a second 401/403 surfaces as an auth failure.
/// Any other response is returned as-is for the adapter to interpret.
pub(crate) async fn send_with_bearer<F>(
    transport: &Arc<dyn HttpTransport>,
    tokens: &TokenManager<dyn HttpTransport>,
    operation: &str,
    build: F,
) -> Result<HttpResponse, ToolError>
where
    F: Fn(&str) -> HttpRequest,
{
    let token = tokens.get_token().await?;
    let response = transport
        .execute(&build(token.secret()))
        .await
        .map_err(|e| transport_failure(operation, e))?;

    if !response.is_auth_failure() {
        return Ok(response);
    }

    debug!(operation, status = response.status, "Token rejected, refreshing once");
    tokens.invalidate().await;
    let token = tokens.get_token().await?;
    let response = transport
        .execute(&build(token.secret()))
        .await
        .map_err(|e| transport_failure(operation, e))?;

    if response.is_auth_failure() {
        return Err(ToolError::auth(format!(
            "Upstream rejected credentials again after refresh (HTTP {})",
            response.status
        ))
        .with_status(response.status));
    }

    Ok(response)
}

/// Read a string field, falling back to the unavailable marker
pub(crate) fn string_or_unavailable(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => waypoint_domain::tool::payload::UNAVAILABLE.to_string(),
    }
}

/// Read a numeric field that may arrive as a number or a string; anything
/// unparseable normalizes to zero
pub(crate) fn u32_or_zero(value: &serde_json::Value) -> u32 {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(0);
    }
    value
        .as_str()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_detail() {
        let short = "not found";
        assert_eq!(truncate_detail(short), short);

        let long = "x".repeat(1000);
        let truncated = truncate_detail(&long);
        assert!(truncated.len() < long.len());
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_truncate_detail_respects_char_boundaries() {
        let body = "é".repeat(300);
        // Must not panic on a multi-byte boundary
        let _ = truncate_detail(&body);
    }

    #[test]
    fn test_u32_or_zero() {
        assert_eq!(u32_or_zero(&serde_json::json!(12)), 12);
        assert_eq!(u32_or_zero(&serde_json::json!("34")), 34);
        assert_eq!(u32_or_zero(&serde_json::json!(" 7 ")), 7);
        assert_eq!(u32_or_zero(&serde_json::json!("RAC 12")), 0);
        assert_eq!(u32_or_zero(&serde_json::json!(null)), 0);
        assert_eq!(u32_or_zero(&serde_json::json!(-3)), 0);
    }

    #[test]
    fn test_string_or_unavailable() {
        assert_eq!(string_or_unavailable(&serde_json::json!("AI")), "AI");
        assert_eq!(string_or_unavailable(&serde_json::json!("")), "unavailable");
        assert_eq!(string_or_unavailable(&serde_json::json!(null)), "unavailable");
    }
}
