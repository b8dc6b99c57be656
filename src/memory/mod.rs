//! Session-scoped conversation memory.
//!
//! Holds the bounded window of recent messages that is replayed to the model
//! on every allowed turn. Nothing here outlives the process.

pub mod buffer;
pub mod message;

pub use buffer::{ConversationMemory, DEFAULT_CAPACITY};
pub use message::{Message, Role};

use crate::config::MemoryConfig;

/// Factory: create the conversation buffer from config.
pub fn create_memory(config: &MemoryConfig) -> ConversationMemory {
    ConversationMemory::new(config.capacity)
}
