// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST client for the Deskwire console backend.
//!
//! This crate covers the read surface the console renders (agents,
//! conversations, dashboard stats, analytics) and the two mutations
//! (create conversation, send message). Live updates arrive over the
//! transport channel in `deskwire-live`, not through this client.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    Agent, AgentCapability, AgentConfiguration, AgentsResponse, AnalyticsSummary, ApiErrorBody,
    ConversationFilter, ConversationPage, CreateConversationRequest, DashboardStats, HealthReport,
    IntentCount, SendMessageRequest,
};
