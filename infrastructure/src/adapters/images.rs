//! `image_search` tool: stock images for a free-text query.
//!
//! Talks to a Pexels-style API authenticated with a static API key header.
//! Each photo entry yields an [`ImageAsset`] with a direct media URL (medium
//! rendition, falling back to the original) and photographer attribution when
//! present. Entries without a resolvable URL are dropped before the cap of 5
//! is applied, preserving upstream relevance order.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use waypoint_domain::tool::{
    adapter::ToolAdapter,
    entities::{ToolDefinition, ToolParameter, ToolRequest},
    payload::{ImageAsset, ToolPayload},
    validation::{SchemaValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

use crate::http::{HttpRequest, HttpTransport};

use super::{transport_failure, upstream_failure, MAX_ENTRIES};

/// Canonical tool id for the image search tool.
pub const IMAGE_SEARCH: &str = "image_search";

fn definition() -> ToolDefinition {
    ToolDefinition::new(
        IMAGE_SEARCH,
        "Search and retrieve travel images for a search query",
    )
    .with_parameter(ToolParameter::new(
        "query",
        "The search query for finding travel images",
        true,
    ))
}

/// Image search adapter
pub struct ImageSearchAdapter {
    definition: ToolDefinition,
    transport: Arc<dyn HttpTransport>,
    search_url: String,
    api_key: String,
}

impl ImageSearchAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        search_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            definition: definition(),
            transport,
            search_url: search_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn search(&self, request: &ToolRequest) -> Result<Vec<ImageAsset>, ToolError> {
        let query = request.require_string("query").map_err(ToolError::validation)?;

        let http_request = HttpRequest::get(&self.search_url)
            .with_query("query", query)
            .with_query("per_page", "15")
            .with_header("Authorization", &self.api_key);

        let response = self
            .transport
            .execute(&http_request)
            .await
            .map_err(|e| transport_failure(IMAGE_SEARCH, e))?;

        if response.is_auth_failure() {
            // Static API key: nothing to refresh, reject outright
            return Err(ToolError::auth(format!(
                "Image API rejected the key (HTTP {})",
                response.status
            ))
            .with_status(response.status));
        }
        if !response.is_success() {
            return Err(upstream_failure(&response));
        }

        let body = response
            .json_value()
            .map_err(|e| ToolError::upstream(response.status, format!("malformed body: {}", e)))?;

        let photos = body["photos"].as_array().cloned().unwrap_or_default();
        debug!(tool = IMAGE_SEARCH, upstream = photos.len(), "Normalizing photos");

        Ok(photos
            .iter()
            .filter_map(normalize_photo)
            .take(MAX_ENTRIES)
            .collect())
    }
}

/// Normalize one photo entry; entries without a resolvable URL are dropped.
fn normalize_photo(photo: &serde_json::Value) -> Option<ImageAsset> {
    let url = photo["src"]["medium"]
        .as_str()
        .or_else(|| photo["src"]["original"].as_str())
        .filter(|s| !s.is_empty())?;

    let photographer = photo["photographer"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Some(ImageAsset {
        url: url.to_string(),
        photographer,
    })
}

#[async_trait]
impl ToolAdapter for ImageSearchAdapter {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn invoke(&self, request: &ToolRequest) -> ToolResult {
        let start = Instant::now();

        if let Err(e) = SchemaValidator.validate(request, &self.definition) {
            return ToolResult::failure(IMAGE_SEARCH, e);
        }

        match self.search(request).await {
            Ok(images) => ToolResult::success(IMAGE_SEARCH, ToolPayload::Images(images)),
            Err(e) => ToolResult::failure(IMAGE_SEARCH, e),
        }
        .with_duration(start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubTransport;
    use waypoint_domain::tool::value_objects::ToolErrorKind;

    const SEARCH_URL: &str = "https://images.example/v1/search";

    fn adapter(stub: std::sync::Arc<StubTransport>) -> ImageSearchAdapter {
        ImageSearchAdapter::new(stub, SEARCH_URL, "px-key")
    }

    /// Seven photos, two of which have no resolvable URL.
    fn seven_photos_two_bad() -> String {
        let mut photos = Vec::new();
        for i in 1..=7 {
            let photo = match i {
                3 => serde_json::json!({"photographer": "P3", "src": {}}),
                6 => serde_json::json!({"photographer": "P6", "src": {"medium": ""}}),
                _ => serde_json::json!({
                    "photographer": format!("P{}", i),
                    "src": {"medium": format!("https://images.example/photo-{}.jpg", i)}
                }),
            };
            photos.push(photo);
        }
        serde_json::json!({ "photos": photos }).to_string()
    }

    #[tokio::test]
    async fn test_unresolvable_urls_dropped_then_capped_at_five() {
        let stub = std::sync::Arc::new(StubTransport::new().respond_json(
            SEARCH_URL,
            200,
            &seven_photos_two_bad(),
        ));
        let request = ToolRequest::new(IMAGE_SEARCH).with_arg("query", "Bengaluru attractions");
        let result = adapter(stub).invoke(&request).await;

        assert!(result.is_success());
        let Some(ToolPayload::Images(images)) = result.payload() else {
            panic!("wrong payload variant");
        };
        assert_eq!(images.len(), 5);
        // Upstream order preserved, bad entries 3 and 6 skipped
        let urls: Vec<&str> = images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://images.example/photo-1.jpg",
                "https://images.example/photo-2.jpg",
                "https://images.example/photo-4.jpg",
                "https://images.example/photo-5.jpg",
                "https://images.example/photo-7.jpg",
            ]
        );
        assert_eq!(images[0].photographer.as_deref(), Some("P1"));
    }

    #[tokio::test]
    async fn test_zero_photos_is_success() {
        let stub = std::sync::Arc::new(StubTransport::new().respond_json(
            SEARCH_URL,
            200,
            r#"{"photos":[]}"#,
        ));
        let request = ToolRequest::new(IMAGE_SEARCH).with_arg("query", "nowhere");
        let result = adapter(stub).invoke(&request).await;

        assert!(result.is_success());
        assert_eq!(result.metadata.entry_count, Some(0));
    }

    #[tokio::test]
    async fn test_missing_query_issues_zero_calls() {
        let stub = std::sync::Arc::new(StubTransport::new());
        let adapter = adapter(stub.clone());

        let result = adapter.invoke(&ToolRequest::new(IMAGE_SEARCH)).await;

        assert_eq!(result.error().unwrap().kind, ToolErrorKind::Validation);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_key_is_auth_failure() {
        let stub = std::sync::Arc::new(StubTransport::new().respond_json(
            SEARCH_URL,
            403,
            r#"{"error":"forbidden"}"#,
        ));
        let request = ToolRequest::new(IMAGE_SEARCH).with_arg("query", "Pune");
        let result = adapter(stub.clone()).invoke(&request).await;

        assert_eq!(result.error().unwrap().kind, ToolErrorKind::Auth);
        // No refresh path for a static key
        assert_eq!(stub.calls_to(SEARCH_URL), 1);
    }

    #[tokio::test]
    async fn test_api_key_header_is_sent() {
        let stub = std::sync::Arc::new(StubTransport::new().respond_json(
            SEARCH_URL,
            200,
            r#"{"photos":[]}"#,
        ));
        let adapter = adapter(stub.clone());

        let request = ToolRequest::new(IMAGE_SEARCH).with_arg("query", "Pune");
        adapter.invoke(&request).await;

        let sent = stub.requests_to(SEARCH_URL);
        assert!(sent[0]
            .headers
            .iter()
            .any(|(name, value)| name == "Authorization" && value == "px-key"));
        assert_eq!(sent[0].query_param("query"), Some("Pune"));
    }
}
