use crate::models::{Message, MessageStatus};

/// Ordered message list for the conversation currently open. Append-only:
/// reconciliation replaces entries in place, never re-sorts, so a user's own
/// messages keep the position they were composed at.
#[derive(Debug, Default)]
pub struct Timeline {
    messages: Vec<Message>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from a fetch, oldest-first.
    pub fn load(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn find_by_temp_id_mut(&mut self, temp_id: &str) -> Option<&mut Message> {
        self.messages
            .iter_mut()
            .find(|m| m.temp_id.as_deref() == Some(temp_id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    pub fn remove_by_temp_id(&mut self, temp_id: &str) -> Option<Message> {
        let idx = self
            .messages
            .iter()
            .position(|m| m.temp_id.as_deref() == Some(temp_id))?;
        Some(self.messages.remove(idx))
    }

    /// Find an optimistic entry that plausibly corresponds to an incoming echo:
    /// same sender, carries a temp id, and either equal non-empty content or
    /// both sides attachment-only. Content equality is a proxy for identity
    /// because the optimistic id differs from the server id; near-duplicate
    /// texts sent in quick succession may mis-match.
    pub fn find_echo_match(
        &self,
        sender_id: &str,
        content: &str,
        has_media: bool,
    ) -> Option<usize> {
        self.messages.iter().position(|m| {
            if m.sender_id != sender_id || m.temp_id.is_none() {
                return false;
            }
            if !content.is_empty() {
                m.content == content
            } else {
                m.content.is_empty() && !m.media.is_empty() && has_media
            }
        })
    }

    /// Replace the entry at `idx` in place, keeping its position and temp id.
    pub fn replace_at(&mut self, idx: usize, mut message: Message) {
        message.temp_id = self.messages[idx].temp_id.clone();
        if message.status == MessageStatus::Pending {
            message.status = MessageStatus::Sent;
        }
        self.messages[idx] = message;
    }
}
