// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Message Domain Types
//!
//! Defines the value objects routed by the message bus:
//!
//! - [`Message`] — the routed record; immutable once constructed.
//! - [`MessageKind`] — the fixed vocabulary of message types. Its snake_case
//!   string form doubles as the broadcast topic.
//! - [`MessageId`] — unique identifier (UUID newtype).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// Generate a new random `MessageId`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed vocabulary of message types exchanged between agents.
///
/// The serde form and [`MessageKind::as_str`] agree byte-for-byte; broadcast
/// topic matching compares subscription strings against `as_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    TaskRequest,
    TaskResponse,
    TaskComplete,
    StatusUpdate,
    KnowledgeShare,
    VoteRequest,
    VoteResponse,
    Error,
    Heartbeat,
}

impl MessageKind {
    /// Every kind, in declaration order.
    pub const ALL: [MessageKind; 9] = [
        MessageKind::TaskRequest,
        MessageKind::TaskResponse,
        MessageKind::TaskComplete,
        MessageKind::StatusUpdate,
        MessageKind::KnowledgeShare,
        MessageKind::VoteRequest,
        MessageKind::VoteResponse,
        MessageKind::Error,
        MessageKind::Heartbeat,
    ];

    /// The canonical snake_case form, used as the broadcast topic string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MessageKind::TaskRequest => "task_request",
            MessageKind::TaskResponse => "task_response",
            MessageKind::TaskComplete => "task_complete",
            MessageKind::StatusUpdate => "status_update",
            MessageKind::KnowledgeShare => "knowledge_share",
            MessageKind::VoteRequest => "vote_request",
            MessageKind::VoteResponse => "vote_response",
            MessageKind::Error => "error",
            MessageKind::Heartbeat => "heartbeat",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A routed message between agents.
///
/// Constructed via [`Message::new`] plus the consuming `to` / `with_*`
/// builders. Without a recipient the message is a broadcast to subscribers of
/// its kind's topic; with one it is delivered directly to that agent's
/// mailbox.
///
/// # Invariants
///
/// - Immutable after construction; the bus never mutates a message in place
///   and mailboxes hold their own clones.
/// - `priority` is carried and serialized but consulted by no ordering logic;
///   it is informational for the embedding runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier, assigned at construction.
    pub id: MessageId,
    /// What kind of message this is; its string form is the broadcast topic.
    pub kind: MessageKind,
    /// The agent that produced the message.
    pub sender: String,
    /// Direct-delivery target; `None` means broadcast.
    pub recipient: Option<String>,
    /// Structured payload; interpretation belongs to the agent runtime.
    pub content: Value,
    /// When the message was constructed.
    pub timestamp: DateTime<Utc>,
    /// Informational priority hint, default 0. Not consulted for ordering.
    #[serde(default)]
    pub priority: i64,
    /// Extensible metadata, default empty.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Message {
    /// Create a broadcast message from `sender` with the given payload.
    pub fn new(kind: MessageKind, sender: impl Into<String>, content: Value) -> Self {
        Self {
            id: MessageId::new(),
            kind,
            sender: sender.into(),
            recipient: None,
            content,
            timestamp: Utc::now(),
            priority: 0,
            metadata: HashMap::new(),
        }
    }

    /// Address the message to a single recipient (direct delivery).
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Attach an informational priority hint.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Replace the metadata map.
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── MessageKind ───────────────────────────────────────────────────────────

    #[test]
    fn test_kind_str_matches_serde_form() {
        for kind in MessageKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_kind_display_uses_topic_form() {
        assert_eq!(MessageKind::StatusUpdate.to_string(), "status_update");
        assert_eq!(MessageKind::Heartbeat.to_string(), "heartbeat");
    }

    #[test]
    fn test_kind_all_has_no_duplicates() {
        let topics: std::collections::HashSet<&str> =
            MessageKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(topics.len(), MessageKind::ALL.len());
    }

    // ── Message ───────────────────────────────────────────────────────────────

    #[test]
    fn test_new_message_defaults() {
        let message = Message::new(MessageKind::TaskRequest, "a1", json!({"task": "scan"}));
        assert_eq!(message.sender, "a1");
        assert_eq!(message.recipient, None);
        assert_eq!(message.priority, 0);
        assert!(message.metadata.is_empty());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let first = Message::new(MessageKind::Heartbeat, "a1", Value::Null);
        let second = Message::new(MessageKind::Heartbeat, "a1", Value::Null);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_message_builders() {
        let mut metadata = HashMap::new();
        metadata.insert("trace".to_string(), json!("t-42"));

        let message = Message::new(MessageKind::TaskResponse, "a1", json!({"ok": true}))
            .to("a2")
            .with_priority(5)
            .with_metadata(metadata);

        assert_eq!(message.recipient.as_deref(), Some("a2"));
        assert_eq!(message.priority, 5);
        assert_eq!(message.metadata.get("trace"), Some(&json!("t-42")));
    }

    #[test]
    fn test_message_serde_round_trip() {
        let message = Message::new(MessageKind::KnowledgeShare, "a1", json!({"fact": 1})).to("a2");
        let encoded = serde_json::to_string(&message).unwrap();
        let decoded: Message = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.id, message.id);
        assert_eq!(decoded.kind, MessageKind::KnowledgeShare);
        assert_eq!(decoded.recipient.as_deref(), Some("a2"));
        assert_eq!(decoded.content, json!({"fact": 1}));
    }
}
