//! Remote planning engine adapter
//!
//! Implements [`PlanningEnginePort`] against an HTTP planning service.
//! The service receives the instructions plus the list of tool ids it
//! may call, and returns a structured guide document as JSON.

use crate::adapters::truncate_detail;
use crate::http::{HttpRequest, HttpTransport, TransportError};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};
use waypoint_application::ports::{EngineError, PlanOutcome, PlanRequest, PlanningEnginePort};

/// Planning engine that delegates guide construction to a remote service.
pub struct RemotePlanningEngine {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl RemotePlanningEngine {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PlanningEnginePort for RemotePlanningEngine {
    async fn run(&self, request: &PlanRequest) -> Result<PlanOutcome, EngineError> {
        debug!(endpoint = %self.endpoint, tools = ?request.tool_ids, "dispatching plan request");

        let http_request = HttpRequest::post(&self.endpoint).with_json(json!({
            "instructions": request.instructions,
            "tools": request.tool_ids,
        }));

        let response = self
            .transport
            .execute(&http_request)
            .await
            .map_err(|e| match e {
                TransportError::Timeout => EngineError::Timeout,
                TransportError::Connect(msg) => EngineError::Unreachable(msg),
                TransportError::InvalidRequest(msg) => EngineError::Unreachable(msg),
            })?;

        if !response.is_success() {
            warn!(status = response.status, "planning engine returned error");
            return Err(EngineError::UpstreamStatus {
                status: response.status,
                detail: truncate_detail(&response.body),
            });
        }

        let body = response
            .json_value()
            .map_err(|e| EngineError::MalformedOutput(e.to_string()))?;

        let document = body
            .get("result")
            .cloned()
            .ok_or_else(|| EngineError::MalformedOutput("missing 'result' field".into()))?;

        Ok(PlanOutcome { document })
    }
}
