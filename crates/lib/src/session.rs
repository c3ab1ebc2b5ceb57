//! # Chat Session State
//!
//! The in-memory chat transcript: an ordered, append-only sequence of
//! messages that lives only for the lifetime of the session. There is no
//! persistence, deduplication, or eviction.

use serde::{Deserialize, Serialize};

/// The greeting the assistant seeds every fresh transcript with.
pub const GREETING: &str =
    "Hello! I'm your SQL assistant. Ask me anything about your database.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// The ordered chat history for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript seeded with the assistant greeting.
    ///
    /// The seed message is present before any user interaction.
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                role: Role::Ai,
                content: GREETING.to_string(),
            }],
        }
    }

    pub fn push_human(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::Human,
            content: content.into(),
        });
    }

    pub fn push_ai(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::Ai,
            content: content.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
