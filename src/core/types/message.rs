//! Message types for chat completions

use serde::{Deserialize, Serialize};

/// Message role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Tool message
    Tool,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::Tool => write!(f, "tool"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// Name of message sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }
}

/// Create a system message
pub fn system_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(MessageRole::System, content)
}

/// Create a user message
pub fn user_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(MessageRole::User, content)
}

/// Create an assistant message
pub fn assistant_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(MessageRole::Assistant, content)
}
