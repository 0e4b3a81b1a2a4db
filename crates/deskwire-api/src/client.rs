// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the console backend REST API.
//!
//! Provides [`ApiClient`]. Every request carries a bounded timeout; the
//! idempotent read endpoints additionally retry once on transient failures.

use std::time::Duration;

use deskwire_config::ApiConfig;
use deskwire_core::{Conversation, DeskwireError};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{
    Agent, AgentsResponse, AnalyticsSummary, ApiErrorBody, ConversationFilter, ConversationPage,
    CreateConversationRequest, DashboardStats, HealthReport, SendMessageRequest,
};

/// HTTP client for backend REST communication.
///
/// Every request carries the configured timeout, so a hung backend surfaces
/// as [`DeskwireError::Timeout`] instead of blocking the console. GETs retry
/// once on transient errors (429, 500, 502, 503); mutations never retry, a
/// duplicated send is worse than a failed one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    request_timeout: Duration,
}

impl ApiClient {
    /// Creates a new backend API client from the `[api]` configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, DeskwireError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let request_timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()
            .map_err(|e| DeskwireError::Api {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
            request_timeout,
        })
    }

    /// `GET /health` -- backend liveness report.
    pub async fn health(&self) -> Result<HealthReport, DeskwireError> {
        self.get_json("/health", &[]).await
    }

    /// `GET /agents` -- the agent roster, unwrapped from its envelope.
    pub async fn list_agents(&self) -> Result<Vec<Agent>, DeskwireError> {
        let response: AgentsResponse = self.get_json("/agents", &[]).await?;
        Ok(response.agents)
    }

    /// `GET /dashboard/stats` -- aggregate dashboard counters.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, DeskwireError> {
        self.get_json("/dashboard/stats", &[]).await
    }

    /// `GET /conversations` -- one page of conversations, optionally
    /// filtered by status.
    pub async fn list_conversations(
        &self,
        filter: &ConversationFilter,
    ) -> Result<ConversationPage, DeskwireError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", filter.page.to_string()),
            ("page_size", filter.page_size.to_string()),
        ];
        if let Some(status) = filter.status {
            query.push(("status", status.to_string()));
        }
        self.get_json("/conversations", &query).await
    }

    /// `GET /conversations/{id}` -- a single conversation with its full
    /// message history.
    pub async fn get_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<Conversation, DeskwireError> {
        self.get_json(&format!("/conversations/{conversation_id}"), &[])
            .await
    }

    /// `POST /conversations` -- creates a conversation and returns it.
    pub async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation, DeskwireError> {
        self.post_json("/conversations", request).await
    }

    /// `POST /conversations/{id}/messages` -- appends a message.
    ///
    /// The backend processes the message asynchronously and delivers any
    /// reply over the live channel, so the 2xx response body is ignored.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> Result<(), DeskwireError> {
        let path = format!("/conversations/{conversation_id}/messages");
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        debug!(status = %status, path = %path, "send response received");

        if status.is_success() {
            return Ok(());
        }

        Err(error_from_body(
            status,
            &response.text().await.unwrap_or_default(),
        ))
    }

    /// `GET /analytics/conversations/summary` -- rollup analytics.
    pub async fn conversation_summary(&self) -> Result<AnalyticsSummary, DeskwireError> {
        self.get_json("/analytics/conversations/summary", &[]).await
    }

    /// Issues a GET and decodes the JSON response.
    ///
    /// On transient errors (429, 500, 502, 503), retries once after a
    /// 1-second delay. Network-level failures are not retried.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DeskwireError> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, path, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(|e| self.request_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, path, "response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| DeskwireError::Api {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| DeskwireError::Api {
                    message: format!("failed to parse backend response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(DeskwireError::Api {
                    message: format!("backend returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            return Err(error_from_body(
                status,
                &response.text().await.unwrap_or_default(),
            ));
        }

        Err(last_error.unwrap_or_else(|| DeskwireError::Api {
            message: "request failed after retries".into(),
            source: None,
        }))
    }

    /// Issues a POST and decodes the JSON response. Never retries.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DeskwireError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        debug!(status = %status, path, "response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| DeskwireError::Api {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            return serde_json::from_str(&body).map_err(|e| DeskwireError::Api {
                message: format!("failed to parse backend response: {e}"),
                source: Some(Box::new(e)),
            });
        }

        Err(error_from_body(
            status,
            &response.text().await.unwrap_or_default(),
        ))
    }

    /// Maps a reqwest transport failure, distinguishing the bounded
    /// timeout from other network errors.
    fn request_error(&self, e: reqwest::Error) -> DeskwireError {
        if e.is_timeout() {
            DeskwireError::Timeout {
                duration: self.request_timeout,
            }
        } else {
            DeskwireError::Api {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

/// Builds an error from a non-success response, surfacing the FastAPI
/// `detail` field when the body carries one.
fn error_from_body(status: reqwest::StatusCode, body: &str) -> DeskwireError {
    let message = if let Ok(err_body) = serde_json::from_str::<ApiErrorBody>(body) {
        format!("backend error ({status}): {}", err_body.detail)
    } else {
        format!("backend returned {status}: {body}")
    };
    DeskwireError::Api {
        message,
        source: None,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}
