//! In-game debug log shown in the status area.

use std::collections::VecDeque;

/// Number of messages kept.
pub const DEBUG_LOG_CAPACITY: usize = 3;

/// Short ring buffer of recent messages, owned by a session.
#[derive(Debug, Clone, Default)]
pub struct DebugLog {
    messages: VecDeque<String>,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        if self.messages.len() == DEBUG_LOG_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(msg.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Oldest first, joined with `|`.
    pub fn joined(&self) -> String {
        self.messages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}
