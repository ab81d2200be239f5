//! Chat response types

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// Unified successful chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response id
    pub id: String,
    /// Model that produced the completion
    pub model: String,
    /// Choice list
    pub choices: Vec<Choice>,
    /// Usage statistics
    #[serde(default)]
    pub usage: Usage,
    /// Unix timestamp of creation
    pub created: i64,
    /// Provider that served the request
    pub provider: String,
    /// Correlation id echoed from the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// A single completion choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
