//! Tool domain value objects: immutable result and error types
//!
//! These types form the **output side** of every tool invocation. An adapter
//! never lets a fault escape its boundary: each call path resolves to a
//! [`ToolResult`] carrying either a typed payload or a [`ToolError`].
//!
//! The error kinds are the failure taxonomy the planning engine reasons
//! about:
//!
//! | Kind | Meaning | Network calls issued |
//! |------|---------|----------------------|
//! | `Validation` | Input failed schema validation | zero |
//! | `Auth` | Credential exchange failed, or a second 401/403 after one refresh | token endpoint only |
//! | `NotFound` | An intermediate resolution step found zero matches | resolution step only |
//! | `Upstream` | Non-2xx, timeout, or connectivity failure at the capability endpoint | as attempted |
//!
//! Zero matching records from the main query is **not** an error: it is a
//! success with an empty list.

use serde::{Deserialize, Serialize};

use super::payload::ToolPayload;

/// Failure kind of a tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// Input failed schema validation; no network call was issued
    Validation,
    /// Credential exchange failed or the refresh-and-retry path exhausted
    Auth,
    /// An intermediate resolution step (e.g. geocoding) found zero matches
    NotFound,
    /// Non-2xx response, timeout, or connectivity failure from the capability endpoint
    Upstream,
}

impl ToolErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ToolErrorKind::Validation => "validation",
            ToolErrorKind::Auth => "auth",
            ToolErrorKind::NotFound => "not_found",
            ToolErrorKind::Upstream => "upstream",
        }
    }
}

impl std::fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error that terminated a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Failure kind
    pub kind: ToolErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Additional diagnostic detail (e.g. truncated upstream body)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// HTTP status of the upstream response, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            status: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    // Common constructors, one per taxonomy kind

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Validation, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Auth, message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ToolErrorKind::NotFound,
            format!("No match found: {}", resource.into()),
        )
    }

    pub fn upstream(status: u16, detail: impl Into<String>) -> Self {
        Self::new(
            ToolErrorKind::Upstream,
            format!("Upstream returned HTTP {}", status),
        )
        .with_status(status)
        .with_details(detail)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            ToolErrorKind::Upstream,
            format!("Operation timed out: {}", operation.into()),
        )
    }

    pub fn connectivity(detail: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Upstream, "Upstream unreachable").with_details(detail)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Outcome of a tool invocation
///
/// Exactly one of `payload` and `error` is set. A success payload always
/// conforms to the tool's declared output schema, even when the upstream
/// returned zero matching records (empty list, not absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Identifier of the tool that was invoked
    pub tool_id: String,
    /// Normalized payload (for successful invocation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ToolPayload>,
    /// Error information (for failed invocation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the invocation
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about a tool invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Wall-clock duration of the invocation in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of normalized entries in the payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_count: Option<usize>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_id: impl Into<String>, payload: ToolPayload) -> Self {
        let entry_count = payload.entry_count();
        Self {
            tool_id: tool_id.into(),
            payload: Some(payload),
            error: None,
            metadata: ToolResultMetadata {
                duration_ms: None,
                entry_count: Some(entry_count),
            },
        }
    }

    /// Create a failed result
    pub fn failure(tool_id: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_id: tool_id.into(),
            payload: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    /// Check if the invocation was successful
    pub fn is_success(&self) -> bool {
        self.payload.is_some()
    }

    /// Get the payload
    pub fn payload(&self) -> Option<&ToolPayload> {
        self.payload.as_ref()
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::payload::ImageAsset;

    #[test]
    fn test_tool_error_upstream() {
        let err = ToolError::upstream(503, "service unavailable");

        assert_eq!(err.kind, ToolErrorKind::Upstream);
        assert_eq!(err.status, Some(503));
        assert!(err.message.contains("503"));
        assert_eq!(err.details.as_deref(), Some("service unavailable"));
    }

    #[test]
    fn test_tool_error_display() {
        let err = ToolError::validation("Missing required argument: origin");
        assert_eq!(
            err.to_string(),
            "[validation] Missing required argument: origin"
        );
    }

    #[test]
    fn test_tool_result_success_empty_list() {
        // Zero matching records is still a success
        let result = ToolResult::success("image_search", ToolPayload::Images(vec![]));

        assert!(result.is_success());
        assert!(result.error().is_none());
        assert_eq!(result.metadata.entry_count, Some(0));
    }

    #[test]
    fn test_tool_result_failure() {
        let result = ToolResult::failure("weather_lookup", ToolError::not_found("city 'Atlantis'"));

        assert!(!result.is_success());
        assert!(result.payload().is_none());
        assert_eq!(result.error().unwrap().kind, ToolErrorKind::NotFound);
    }

    #[test]
    fn test_tool_result_entry_count() {
        let payload = ToolPayload::Images(vec![ImageAsset {
            url: "https://images.example/1.jpg".to_string(),
            photographer: None,
        }]);
        let result = ToolResult::success("image_search", payload).with_duration(12);

        assert_eq!(result.metadata.entry_count, Some(1));
        assert_eq!(result.metadata.duration_ms, Some(12));
    }
}
