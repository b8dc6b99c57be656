use super::traits::{Prompt, PromptBuilder};
use crate::memory::{Message, Role};
use crate::providers::ChatMessage;

/// Chess-expert persona sent as the system message of every model call.
pub const SYSTEM_PROMPT: &str = "You are an expert chess assistant with deep knowledge of chess rules, \
strategies, openings, endgames, famous players, and chess history.

Your responses should be:
- Accurate and factual about chess
- Clear and concise (2-4 sentences typically, longer for complex topics)
- Educational and friendly in tone
- Well-structured with proper formatting
- Only about chess topics
- Personalized with user's name when available

When explaining moves, use standard algebraic notation (e.g., e4, Nf3, O-O).
When discussing players, include relevant context like nationality and era.
Provide examples when explaining tactics or strategies.";

/// Builds prompts from a fixed system instruction, the memory window and the
/// current message.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    system_prompt: String,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::with_system_prompt(SYSTEM_PROMPT)
    }

    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    fn system_message(&self, user_name: Option<&str>) -> ChatMessage {
        match user_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => ChatMessage::system(format!(
                "{}\n\nThe user's name is {name}. Use their name naturally in your responses when appropriate.",
                self.system_prompt
            )),
            None => ChatMessage::system(self.system_prompt.clone()),
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder for RequestBuilder {
    fn build(&self, window: &[Message], user_name: Option<&str>, user_message: &str) -> Prompt {
        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(self.system_message(user_name));
        // Only the builder speaks as system
        messages.extend(
            window
                .iter()
                .filter(|m| m.role() != Role::System)
                .map(ChatMessage::from),
        );
        messages.push(ChatMessage::user(user_message));
        Prompt::new(messages)
    }

    fn name(&self) -> &str {
        "chess-expert"
    }
}
