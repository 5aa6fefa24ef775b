use std::collections::{HashMap, HashSet};

/// Per-conversation set of participants currently typing. Membership only;
/// the debounced keystroke source is responsible for eventually emitting a
/// matching stop.
#[derive(Debug, Default)]
pub struct TypingRegistry {
    typing: HashMap<String, HashSet<String>>,
}

impl TypingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent: re-starting while already typing changes nothing.
    pub fn start(&mut self, conversation_id: &str, user_id: &str) {
        self.typing
            .entry(conversation_id.to_string())
            .or_default()
            .insert(user_id.to_string());
    }

    /// Removing an absent id is a no-op, not an error.
    pub fn stop(&mut self, conversation_id: &str, user_id: &str) {
        if let Some(set) = self.typing.get_mut(conversation_id) {
            set.remove(user_id);
            if set.is_empty() {
                self.typing.remove(conversation_id);
            }
        }
    }

    pub fn typing_users(&self, conversation_id: &str) -> Vec<&str> {
        self.typing
            .get(conversation_id)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_typing(&self, conversation_id: &str, user_id: &str) -> bool {
        self.typing
            .get(conversation_id)
            .is_some_and(|set| set.contains(user_id))
    }
}
