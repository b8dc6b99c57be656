//! Topic guard: keeps the assistant on chess.
//!
//! The guard is a pure classifier over the static tables in [`vocabulary`].
//! A rejection is a normal outcome, answered with [`rejection_message`],
//! never an error.

pub mod keyword;
pub mod traits;
pub mod vocabulary;

pub use keyword::{KeywordTopicGuard, Vocabulary};
pub use traits::{GuardDecision, GuardSignal, TopicGuard};

use crate::config::GuardConfig;

/// Fixed redirect returned for off-topic messages.
pub fn rejection_message() -> &'static str {
    "I'm sorry, but I can only answer questions related to chess.

Please ask me about:
• Chess rules and regulations
• Opening strategies and defenses
• Famous players and games
• Chess tactics and strategies
• Tournament history
• Anything else chess-related!"
}

/// Factory: create the topic guard from config.
pub fn create_guard(config: &GuardConfig) -> anyhow::Result<Box<dyn TopicGuard>> {
    Ok(Box::new(KeywordTopicGuard::with_extra_keywords(
        &config.extra_keywords,
    )?))
}
