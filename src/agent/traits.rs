//! Turn orchestration traits and the values a turn produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::memory::Message;
use crate::providers::ChatMessage;

/// Ordered, role-tagged messages for one model call: system instructions,
/// then the memory window oldest-to-newest, then the current user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    messages: Vec<ChatMessage>,
}

impl Prompt {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Text of the leading system message, if any.
    pub fn system_text(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == "system")
            .map(|m| m.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Assembles the outgoing prompt for a turn.
///
/// Implementations must be deterministic and free of I/O.
pub trait PromptBuilder: Send + Sync {
    fn build(&self, window: &[Message], user_name: Option<&str>, user_message: &str) -> Prompt;

    fn name(&self) -> &str;
}

/// Where the controller is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    AwaitingReply,
}

/// Result of handling one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model answered a chess question.
    Answered { reply: String },
    /// The guard rejected the message; `reply` is the fixed redirect.
    Rejected {
        reply: String,
        reason: Option<String>,
    },
    /// A greeting, introduction or courtesy turn answered without the model.
    Greeted { reply: String },
    /// The model call failed; `error` is the user-facing explanation.
    Failed { error: String },
}

impl TurnOutcome {
    /// Text to show the user for this turn.
    pub fn text(&self) -> &str {
        match self {
            TurnOutcome::Answered { reply }
            | TurnOutcome::Rejected { reply, .. }
            | TurnOutcome::Greeted { reply } => reply,
            TurnOutcome::Failed { error } => error,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TurnOutcome::Failed { .. })
    }
}

/// Snapshot of the session counters for the statistics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub user_name: Option<String>,
    pub question_count: u32,
    pub message_count: u32,
    pub memory_len: usize,
    pub transcript_len: usize,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_exposes_system_text() {
        let prompt = Prompt::new(vec![
            ChatMessage::system("be a chess coach"),
            ChatMessage::user("what is a fork"),
        ]);
        assert_eq!(prompt.system_text(), Some("be a chess coach"));
        assert_eq!(prompt.len(), 2);

        let bare = Prompt::new(vec![ChatMessage::user("e4?")]);
        assert_eq!(bare.system_text(), None);
    }

    #[test]
    fn outcome_text_covers_every_variant() {
        let outcomes = [
            TurnOutcome::Answered { reply: "a".into() },
            TurnOutcome::Rejected {
                reply: "b".into(),
                reason: None,
            },
            TurnOutcome::Greeted { reply: "c".into() },
            TurnOutcome::Failed { error: "d".into() },
        ];
        let texts: Vec<&str> = outcomes.iter().map(TurnOutcome::text).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
        assert!(outcomes[3].is_failure());
        assert!(!outcomes[0].is_failure());
    }
}
