//! Conversation messages exchanged between the support agent and the
//! simulated customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human playing the support agent.
    Agent,
    /// The simulated customer.
    Customer,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Customer => "customer",
        }
    }

    /// Label used when rendering a transcript line.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Agent => "AGENT",
            Self::Customer => "CUSTOMER",
        }
    }
}

/// One turn of the support conversation.
///
/// Messages are only ever appended to a conversation log; a log is discarded
/// as a whole on reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: String,
    pub role: Role,
    pub text: String,
    #[serde(rename = "ts", default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with a fresh id stamped at the current time.
    #[must_use]
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    #[must_use]
    pub fn customer(text: impl Into<String>) -> Self {
        Self::new(Role::Customer, text)
    }

    /// `ROLE: text`
    #[must_use]
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.text)
    }
}

/// Render messages as newline-separated `ROLE: text` lines.
#[must_use]
pub fn format_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(ChatMessage::transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_uses_uppercase_labels() {
        let messages = vec![
            ChatMessage::agent("How can I help?"),
            ChatMessage::customer("My reset link expired."),
        ];

        assert_eq!(
            format_transcript(&messages),
            "AGENT: How can I help?\nCUSTOMER: My reset link expired."
        );
    }

    #[test]
    fn empty_transcript_is_empty_string() {
        assert_eq!(format_transcript(&[]), "");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn deserializes_wire_format() {
        let json = r#"{"id":"m1","role":"customer","text":"hi","ts":"2024-01-15T14:30:00Z"}"#;
        let msg: ChatMessage = serde_json::from_str(json).expect("valid message JSON");

        assert_eq!(msg.id, "m1");
        assert_eq!(msg.role, Role::Customer);
        assert_eq!(msg.timestamp.to_rfc3339(), "2024-01-15T14:30:00+00:00");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn missing_id_and_timestamp_are_tolerated() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"agent","text":"hello"}"#).expect("lenient message");

        assert!(msg.id.is_empty());
        assert_eq!(msg.role, Role::Agent);
    }

    #[test]
    fn new_messages_get_distinct_ids() {
        let a = ChatMessage::agent("one");
        let b = ChatMessage::agent("two");
        assert_ne!(a.id, b.id);
    }
}
