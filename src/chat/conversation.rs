//! Chat transcript
//!
//! The transcript is an append-only log: messages are never edited, removed
//! or reordered once pushed. Readers only ever see a slice snapshot.

use super::schedule::ScheduleEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing
    User,
    /// The task assistant
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn in the visible conversation
///
/// Assistant replies built from a suggestion also keep the structured
/// entries they were formatted from, so renderers do not have to re-parse
/// `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: Ulid,
    content: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<ScheduleEntry>>,
}

impl ChatMessage {
    /// Create a user message stamped with the current time
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content.into(), None)
    }

    /// Create a plain assistant message stamped with the current time
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, content.into(), None)
    }

    /// Create an assistant message carrying the schedule it was formatted from
    pub fn assistant_with_schedule(content: impl Into<String>, schedule: Vec<ScheduleEntry>) -> Self {
        Self::new(Sender::Assistant, content.into(), Some(schedule))
    }

    fn new(sender: Sender, content: String, schedule: Option<Vec<ScheduleEntry>>) -> Self {
        Self {
            id: Ulid::new(),
            content,
            sender,
            timestamp: Utc::now(),
            schedule,
        }
    }

    /// Unique, creation-time sortable identifier
    pub fn id(&self) -> Ulid {
        self.id
    }

    /// Message text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Who wrote the message
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// When the message was created
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Structured schedule behind an assistant suggestion, if any
    pub fn schedule(&self) -> Option<&[ScheduleEntry]> {
        self.schedule.as_deref()
    }

    /// Returns true if the assistant wrote this message
    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

/// Append-only, ordered list of chat messages
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it
    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        let last = self.messages.len() - 1;
        &self.messages[last]
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Most recent message
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been said yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
