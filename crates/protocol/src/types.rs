//! Conversation primitives: roles, turns, and the append-only history.

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// A single role-tagged unit of conversation history.
///
/// Serializes as an OpenAI-style chat message, so a turn slice can be
/// sent to the completion endpoint without conversion.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Ordered, append-only log of turns, seeded with one system turn.
///
/// Append is the only mutation. Turns are never removed or reordered,
/// so the transcript replayed to the model is consistent with every
/// prior call.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create a history seeded with the behavioral contract.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::new(Role::System, system_prompt)],
        }
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::new(Role::Assistant, content));
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::new(Role::User, content));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Role of the most recent turn.
    pub fn last_role(&self) -> Option<Role> {
        self.turns.last().map(|turn| turn.role)
    }
}
