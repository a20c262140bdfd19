//! Success envelope shared by every endpoint.
//!
//! ```json
//! {
//!   "data": { "id": 1, "name": "Shoes" },
//!   "meta": {
//!     "requestId": "6f1c...",
//!     "timestamp": "2026-01-01T00:00:00Z",
//!     "apiVersion": "1.0.0",
//!     "processingTimeMs": 3
//!   }
//! }
//! ```

use crate::middleware::request_context::RequestContext;
use crate::pagination::{PageRequest, Pagination};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: Meta,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub api_version: String,
    pub processing_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl Meta {
    pub fn new(ctx: &RequestContext) -> Self {
        Self {
            request_id: ctx.request_id,
            timestamp: Utc::now(),
            api_version: API_VERSION.to_string(),
            processing_time_ms: ctx.elapsed_ms(),
            pagination: None,
        }
    }
}

/// An [`ApiResponse`] paired with its (always 2xx) status.
#[derive(Debug)]
pub struct Envelope<T> {
    pub status: StatusCode,
    pub body: ApiResponse<T>,
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn success_status(status: StatusCode) -> StatusCode {
    if status.is_success() {
        status
    } else {
        tracing::debug!(%status, "Non-success status passed to success envelope, using 200");
        StatusCode::OK
    }
}

/// Wraps `data` in the envelope. Statuses outside 2xx are replaced with 200.
pub fn send_success<T>(ctx: &RequestContext, status: StatusCode, data: T) -> Envelope<T> {
    Envelope {
        status: success_status(status),
        body: ApiResponse {
            data,
            meta: Meta::new(ctx),
        },
    }
}

/// Like [`send_success`], plus a pagination block computed from `page` and `total_items`.
pub fn send_paginated<T>(
    ctx: &RequestContext,
    status: StatusCode,
    data: Vec<T>,
    page: PageRequest,
    total_items: u64,
) -> Envelope<Vec<T>> {
    let mut envelope = send_success(ctx, status, data);
    envelope.body.meta.pagination = Some(Pagination::for_request(page, total_items));
    envelope
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::time::{Duration, Instant};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_envelope_shape() {
        let ctx = RequestContext::new();
        let response = send_success(&ctx, StatusCode::CREATED, vec!["a"]).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["data"][0], "a");
        assert_eq!(body["meta"]["requestId"], ctx.request_id.to_string());
        assert_eq!(body["meta"]["apiVersion"], API_VERSION);
        assert!(body["meta"]["timestamp"].is_string());
        assert!(body["meta"].get("pagination").is_none());
    }

    #[test]
    fn test_non_success_status_is_coerced() {
        let ctx = RequestContext::new();
        for status in [StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR, StatusCode::FOUND] {
            assert_eq!(send_success(&ctx, status, ()).status, StatusCode::OK);
        }
        assert_eq!(send_success(&ctx, StatusCode::ACCEPTED, ()).status, StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_paginated_envelope() {
        let ctx = RequestContext::new();
        let page = PageRequest::from_raw(Some("2"), Some("10"));
        let response = send_paginated(&ctx, StatusCode::OK, vec![1, 2, 3, 4, 5], page, 15)
            .into_response();

        let body = body_json(response).await;
        let pagination = &body["meta"]["pagination"];
        assert_eq!(pagination["page"], 2);
        assert_eq!(pagination["totalPages"], 2);
        assert_eq!(pagination["hasNext"], false);
        assert_eq!(pagination["hasPrev"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_processing_time_uses_request_start() {
        let started = Instant::now() - Duration::from_millis(40);
        let ctx = RequestContext::started_at(started);
        assert!(Meta::new(&ctx).processing_time_ms >= 40);
        assert_eq!(Meta::new(&RequestContext::detached()).processing_time_ms, 0);
    }
}
