//! Session state: transcript, mind map, progress
//!
//! The store is shared behind a mutex so the debounced transcript save
//! can snapshot the final state after a burst of messages, even when it
//! fires after the mutating call has returned.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::mindmap::MindMap;

/// Progress gained per successful tutor reply
pub const PROGRESS_INCREMENT: u8 = 5;

/// Who authored a transcript message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Tutor,
}

/// One transcript entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a student message
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }

    /// Create a tutor message
    pub fn tutor(content: impl Into<String>) -> Self {
        Self { role: MessageRole::Tutor, content: content.into() }
    }
}

/// The active session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    /// Append-only transcript; cleared only by reset
    pub messages: Vec<ChatMessage>,
    /// Current mind map, replaced wholesale on regeneration
    pub mind_map: MindMap,
    /// Coarse progress counter in [0, 100], non-decreasing between resets
    pub progress: u8,
    /// Chapter name keying remote persistence
    pub current_topic: Option<String>,
}

impl SessionState {
    fn update_progress(&mut self, value: u8) {
        // Clamp, then keep the high-water mark so progress never decreases
        self.progress = self.progress.max(value.min(100));
    }
}

/// Shared handle to the session state
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionStore {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // Mutations never panic while holding the lock
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a message to the transcript
    pub fn add_message(&self, message: ChatMessage) {
        self.lock().messages.push(message);
    }

    /// Replace the mind map wholesale
    pub fn update_mind_map(&self, mind_map: MindMap) {
        self.lock().mind_map = mind_map;
    }

    /// Set progress, clamped to [0, 100] and never below the current value
    pub fn update_progress(&self, value: u8) {
        self.lock().update_progress(value);
    }

    /// Bump progress by the fixed per-reply increment
    pub fn advance_progress(&self) {
        let mut state = self.lock();
        let next = state.progress.saturating_add(PROGRESS_INCREMENT);
        state.update_progress(next);
    }

    /// Set the chapter name keying remote persistence
    pub fn set_current_topic(&self, topic: Option<String>) {
        self.lock().current_topic = topic;
    }

    /// Restore every field to its empty/zero default
    pub fn reset(&self) {
        *self.lock() = SessionState::default();
    }

    /// Replace the transcript (used when restoring remote history)
    pub fn replace_messages(&self, messages: Vec<ChatMessage>) {
        self.lock().messages = messages;
    }

    /// Clone the full state
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Clone the transcript
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().messages.clone()
    }

    /// Current progress value
    pub fn progress(&self) -> u8 {
        self.lock().progress
    }

    /// Current topic, if a chapter is active
    pub fn current_topic(&self) -> Option<String> {
        self.lock().current_topic.clone()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::mindmap::{layout_branches, Branch};

    #[test]
    fn messages_append_in_order() {
        let store = SessionStore::new();
        store.add_message(ChatMessage::user("hi"));
        store.add_message(ChatMessage::tutor("hello"));

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Tutor);
    }

    #[test]
    fn mind_map_replace_is_wholesale() {
        let store = SessionStore::new();
        store.update_mind_map(layout_branches("A", &[Branch::new("X", &["x1"])]));
        store.update_mind_map(layout_branches("B", &[Branch::new("Y", &[])]));

        let state = store.snapshot();
        assert_eq!(state.mind_map.nodes[0].label, "B");
        assert_eq!(state.mind_map.nodes.len(), 2);
    }

    #[test]
    fn progress_clamps_and_holds_high_water_mark() {
        let store = SessionStore::new();
        store.update_progress(40);
        store.update_progress(20);
        assert_eq!(store.progress(), 40);

        store.update_progress(200);
        assert_eq!(store.progress(), 100);
    }

    #[test]
    fn advance_progress_steps_by_increment() {
        let store = SessionStore::new();
        store.advance_progress();
        assert_eq!(store.progress(), PROGRESS_INCREMENT);
    }

    #[test]
    fn reset_restores_defaults() {
        let store = SessionStore::new();
        store.add_message(ChatMessage::user("hi"));
        store.update_mind_map(layout_branches("T", &[Branch::new("X", &[])]));
        store.update_progress(35);
        store.set_current_topic(Some("Kinematics".into()));

        store.reset();

        assert_eq!(store.snapshot(), SessionState::default());
    }

    proptest! {
        /// Progress stays in [0, 100] and never decreases without a reset
        #[test]
        fn progress_is_monotonic(updates in proptest::collection::vec(0u8..=255, 0..50)) {
            let store = SessionStore::new();
            let mut last = 0u8;
            for value in updates {
                store.update_progress(value);
                let current = store.progress();
                prop_assert!(current <= 100);
                prop_assert!(current >= last);
                last = current;
            }
        }
    }
}
