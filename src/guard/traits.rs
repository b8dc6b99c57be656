//! Topic guard traits and decision types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What made a message acceptable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum GuardSignal {
    /// A chess vocabulary term or phrase, lower-cased as matched.
    Keyword(String),
    /// A move-notation pattern, with the pattern name and the matched text.
    Notation { pattern: String, matched: String },
    /// Opening salutation ("hi", "good morning", ...).
    Greeting,
    /// Self-introduction ("my name is ...", "call me ...").
    Introduction,
    /// Thanks or farewell.
    Courtesy,
}

impl GuardSignal {
    /// True for the conversational bypasses that carry no chess content.
    pub fn is_social(&self) -> bool {
        matches!(
            self,
            GuardSignal::Greeting | GuardSignal::Introduction | GuardSignal::Courtesy
        )
    }
}

impl fmt::Display for GuardSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardSignal::Keyword(term) => write!(f, "keyword:{term}"),
            GuardSignal::Notation { pattern, matched } => write!(f, "{pattern}:{matched}"),
            GuardSignal::Greeting => f.write_str("greeting"),
            GuardSignal::Introduction => f.write_str("introduction"),
            GuardSignal::Courtesy => f.write_str("courtesy"),
        }
    }
}

/// Outcome of classifying one user message. Produced and consumed within a
/// single turn; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuardDecision {
    pub allowed: bool,
    /// Why the message was rejected. `None` when allowed.
    pub reason: Option<String>,
    /// The first signal that allowed the message. `None` when rejected.
    pub signal: Option<GuardSignal>,
}

impl GuardDecision {
    pub fn allow(signal: GuardSignal) -> Self {
        Self {
            allowed: true,
            reason: None,
            signal: Some(signal),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            signal: None,
        }
    }

    /// Allowed only through a greeting, introduction or courtesy bypass.
    pub fn is_social_only(&self) -> bool {
        self.allowed && self.signal.as_ref().is_some_and(GuardSignal::is_social)
    }
}

/// Topic relevance filter applied before any model call.
///
/// Implementations must be pure: the same text always yields the same
/// decision for a given instance.
pub trait TopicGuard: Send + Sync {
    /// Classify a raw user message.
    fn classify(&self, text: &str) -> GuardDecision;
    fn name(&self) -> &str;
}
