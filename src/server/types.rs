// Wire types for the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bridge::HistoryEntry;

/// Request body for POST /api/chat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Prior conversation as shown in the frontend; may end with `message`
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
    /// The new user message
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub dynamic_data: DynamicDataStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicDataStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
    pub players: usize,
    pub results: usize,
}
