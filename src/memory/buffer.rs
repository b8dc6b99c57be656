//! Fixed-capacity conversation window.

use std::collections::VecDeque;

use super::message::Message;

/// Default number of messages retained for model context.
pub const DEFAULT_CAPACITY: usize = 10;

/// Bounded, insertion-ordered message buffer with FIFO eviction.
///
/// Invariant: `len() <= capacity()` after every public call.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    capacity: usize,
    entries: VecDeque<Message>,
}

impl ConversationMemory {
    /// Create an empty buffer. A capacity of zero is raised to one so the
    /// most recent message is always available.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append to the tail, evicting from the head until within capacity.
    pub fn append(&mut self, message: Message) {
        self.entries.push_back(message);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Owned snapshot of the buffer, oldest first.
    pub fn window(&self) -> Vec<Message> {
        self.entries.iter().cloned().collect()
    }

    /// Most recently appended message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
