// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request/response types for the console backend REST API.

use std::collections::HashMap;

use deskwire_core::{AgentStatus, Channel, Conversation, ConversationStatus, Priority};
use serde::{Deserialize, Serialize};

// --- Health ---

/// Response from `GET /health`. Serializable for `--json` console output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Liveness indicator (e.g., "healthy").
    pub status: String,
    /// Server-side timestamp of the check, RFC 3339.
    pub timestamp: String,
    /// Name of the responding service.
    pub service: String,
}

// --- Agent roster ---

/// Response envelope for `GET /agents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsResponse {
    /// The full agent roster.
    pub agents: Vec<Agent>,
}

/// An AI agent on the backend roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier. Document stores expose it as `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Human-readable description of the agent's purpose.
    pub description: String,
    /// Operational state.
    pub status: AgentStatus,
    /// Capability descriptors with per-capability confidence.
    #[serde(default)]
    pub capabilities: Vec<AgentCapability>,
    /// Specialization tags (e.g., "technical", "billing").
    #[serde(default)]
    pub specialization: Vec<String>,
    /// Model configuration backing the agent, when the backend exposes it.
    #[serde(default)]
    pub configuration: Option<AgentConfiguration>,
    /// Whether this is the primary agent for its specialization.
    #[serde(default)]
    pub is_primary: bool,
    /// Upper bound on simultaneously assigned conversations.
    #[serde(default)]
    pub max_concurrent_conversations: u32,
    /// Conversations currently assigned.
    #[serde(default)]
    pub current_load: u32,
}

/// A single capability an agent advertises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCapability {
    /// Capability name.
    pub name: String,
    /// What the capability covers.
    pub description: String,
    /// Confidence in the 0.0..=1.0 range.
    pub confidence_score: f64,
}

/// Model configuration backing an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfiguration {
    /// Provider identifier (e.g., "openai", "anthropic").
    pub model_provider: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model_name: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens per response.
    pub max_tokens: u32,
    /// System prompt the agent runs with.
    pub system_prompt: String,
    /// Context window size in tokens.
    pub context_window: u32,
    /// Response timeout in seconds.
    pub response_timeout: u64,
}

// --- Dashboard ---

/// Response from `GET /dashboard/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Conversations currently open.
    pub active_conversations: u64,
    /// Agents currently active.
    pub active_agents: u64,
    /// Mean first-response latency in milliseconds.
    pub avg_response_time_ms: f64,
    /// Mean satisfaction rating.
    pub customer_satisfaction: f64,
    /// Conversations opened today.
    pub conversations_today: u64,
    /// Messages exchanged today.
    pub messages_today: u64,
    /// Fraction of conversations escalated to a human.
    pub escalation_rate: f64,
    /// Fraction of conversations resolved without escalation.
    pub resolution_rate: f64,
}

// --- Conversation listing ---

/// Query parameters for `GET /conversations`.
#[derive(Debug, Clone)]
pub struct ConversationFilter {
    /// Restrict to conversations in this state, or all when `None`.
    pub status: Option<ConversationStatus>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
}

impl Default for ConversationFilter {
    fn default() -> Self {
        Self {
            status: None,
            page: 1,
            page_size: 20,
        }
    }
}

/// One page of conversations from `GET /conversations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationPage {
    /// Conversations on this page.
    pub conversations: Vec<Conversation>,
    /// Total matching conversations across all pages.
    pub total: u64,
    /// 1-based page number echoed back.
    pub page: u32,
    /// Page size echoed back.
    pub page_size: u32,
}

// --- Mutations ---

/// Request body for `POST /conversations`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateConversationRequest {
    /// Customer email, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Customer display name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Business channel the conversation arrives through.
    pub channel: Channel,
    /// First customer message, appended on creation.
    pub initial_message: String,
    /// Handling priority.
    pub priority: Priority,
    /// Free-form metadata attached to the conversation.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Request body for `POST /conversations/{id}/messages`.
///
/// The conversation id travels in the URL path, not the body. The backend
/// replies over the live channel; the HTTP response body carries no message.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    /// Message text.
    pub content: String,
    /// Attachment URLs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    /// Free-form metadata attached to the message.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

// --- Analytics ---

/// Response from `GET /analytics/conversations/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Conversations in the reporting window.
    pub total_conversations: u64,
    /// Mean time to resolution in minutes.
    pub avg_resolution_time_minutes: f64,
    /// Most frequent detected intents, descending by count.
    #[serde(default)]
    pub top_intents: Vec<IntentCount>,
}

/// One intent bucket in the analytics summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentCount {
    /// Detected intent label.
    pub intent: String,
    /// Conversations carrying the intent.
    pub count: u64,
}

// --- Errors ---

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable failure description.
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_agent_roster() {
        let json = r#"{
            "agents": [{
                "id": "agent_sarah",
                "name": "Sarah",
                "description": "Billing specialist",
                "status": "active",
                "capabilities": [
                    {"name": "billing", "description": "Invoice and refund questions", "confidence_score": 0.92}
                ],
                "specialization": ["billing"],
                "configuration": {
                    "model_provider": "openai",
                    "model_name": "gpt-4o-mini",
                    "temperature": 0.7,
                    "max_tokens": 1000,
                    "system_prompt": "You handle billing.",
                    "context_window": 4000,
                    "response_timeout": 30
                },
                "is_primary": true,
                "max_concurrent_conversations": 10,
                "current_load": 3
            }]
        }"#;
        let resp: AgentsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.agents.len(), 1);
        let agent = &resp.agents[0];
        assert_eq!(agent.id, "agent_sarah");
        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.capabilities[0].confidence_score, 0.92);
        assert_eq!(
            agent.configuration.as_ref().unwrap().model_name,
            "gpt-4o-mini"
        );
        assert!(agent.is_primary);
        assert_eq!(agent.current_load, 3);
    }

    #[test]
    fn deserialize_agent_accepts_document_store_id_alias() {
        let json = r#"{
            "_id": "agent_max",
            "name": "Max",
            "description": "Technical support",
            "status": "busy"
        }"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.id, "agent_max");
        assert_eq!(agent.status, AgentStatus::Busy);
        assert!(agent.capabilities.is_empty());
        assert!(agent.configuration.is_none());
    }

    #[test]
    fn deserialize_dashboard_stats() {
        let json = r#"{
            "active_conversations": 12,
            "active_agents": 4,
            "avg_response_time_ms": 850.5,
            "customer_satisfaction": 4.2,
            "conversations_today": 37,
            "messages_today": 412,
            "escalation_rate": 0.08,
            "resolution_rate": 0.81
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.active_conversations, 12);
        assert_eq!(stats.messages_today, 412);
        assert_eq!(stats.escalation_rate, 0.08);
    }

    #[test]
    fn deserialize_conversation_page() {
        let json = r#"{
            "conversations": [{
                "id": "conv-1",
                "customer_id": "cust-1",
                "channel": "web_chat",
                "created_at": "2026-02-10T09:00:00Z",
                "updated_at": "2026-02-10T09:05:00Z"
            }],
            "total": 41,
            "page": 2,
            "page_size": 20
        }"#;
        let page: ConversationPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.conversations.len(), 1);
        assert_eq!(page.conversations[0].id, "conv-1");
        assert_eq!(page.total, 41);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn serialize_create_request_omits_absent_contact_fields() {
        let req = CreateConversationRequest {
            customer_email: None,
            customer_name: None,
            channel: Channel::Email,
            initial_message: "My invoice is wrong.".into(),
            priority: Priority::High,
            metadata: HashMap::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["channel"], "email");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["initial_message"], "My invoice is wrong.");
        assert!(json.get("customer_email").is_none());
        assert!(json.get("customer_name").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn serialize_send_request_keeps_id_out_of_body() {
        let req = SendMessageRequest {
            content: "Can you check order 8841?".into(),
            attachments: vec!["https://files.example/receipt.pdf".into()],
            metadata: HashMap::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["content"], "Can you check order 8841?");
        assert_eq!(json["attachments"][0], "https://files.example/receipt.pdf");
        assert!(json.get("conversation_id").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn deserialize_analytics_summary() {
        let json = r#"{
            "total_conversations": 320,
            "avg_resolution_time_minutes": 14.5,
            "top_intents": [
                {"intent": "billing_question", "count": 92},
                {"intent": "password_reset", "count": 54}
            ]
        }"#;
        let summary: AnalyticsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_conversations, 320);
        assert_eq!(summary.top_intents.len(), 2);
        assert_eq!(summary.top_intents[0].intent, "billing_question");
    }

    #[test]
    fn deserialize_error_body_detail() {
        let json = r#"{"detail": "Conversation not found"}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.detail, "Conversation not found");
    }

    #[test]
    fn default_filter_is_first_page_of_twenty() {
        let filter = ConversationFilter::default();
        assert!(filter.status.is_none());
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 20);
    }
}
