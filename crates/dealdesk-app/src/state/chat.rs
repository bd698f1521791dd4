//! # Chat State
//!
//! Conversation history for the AI assistant panel.
//!
//! The backend performs the model invocation; this state only remembers
//! the turns of the current session so each request can carry the prior
//! conversation. History is bounded: the oldest turns fall off so a
//! long-lived session cannot grow the payload without limit.

use std::sync::{Arc, Mutex};

use dealdesk_client::dto::{ChatRole, ChatTurn};

/// Maximum turns kept (user and assistant turns both count).
pub const MAX_CHAT_TURNS: usize = 50;

/// The assistant conversation of the current session.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(ChatRole::User, content.into());
    }

    /// Records an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ChatRole::Assistant, content.into());
    }

    fn push(&mut self, role: ChatRole, content: String) {
        self.turns.push(ChatTurn { role, content });

        // Drop oldest turns beyond the cap.
        if self.turns.len() > MAX_CHAT_TURNS {
            let excess = self.turns.len() - MAX_CHAT_TURNS;
            self.turns.drain(..excess);
        }
    }

    /// Turns in order, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of recorded turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns are recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forgets the conversation.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// Shared chat state.
#[derive(Debug, Default)]
pub struct ChatState {
    history: Arc<Mutex<ChatHistory>>,
}

impl ChatState {
    /// Creates a new empty chat state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the history.
    pub fn with_history<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ChatHistory) -> R,
    {
        let history = self.history.lock().expect("Chat mutex poisoned");
        f(&history)
    }

    /// Executes a function with write access to the history.
    pub fn with_history_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ChatHistory) -> R,
    {
        let mut history = self.history.lock().expect("Chat mutex poisoned");
        f(&mut history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_order() {
        let mut history = ChatHistory::new();
        history.push_user("What offers are open?");
        history.push_assistant("Three offers are awaiting a decision.");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, ChatRole::User);
        assert_eq!(history.turns()[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = ChatHistory::new();
        for i in 0..MAX_CHAT_TURNS + 10 {
            history.push_user(format!("message {}", i));
        }

        assert_eq!(history.len(), MAX_CHAT_TURNS);
        // Oldest turns fell off; the newest is still the last one pushed.
        assert_eq!(
            history.turns().last().unwrap().content,
            format!("message {}", MAX_CHAT_TURNS + 9)
        );
    }

    #[test]
    fn test_clear() {
        let mut history = ChatHistory::new();
        history.push_user("hello");
        history.clear();
        assert!(history.is_empty());
    }
}
