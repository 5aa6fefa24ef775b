use crate::models::Conversation;

/// Ordered collection of conversation summaries, as shown in the inbox list.
/// Owns summary fields only; message bodies live in the timeline store.
#[derive(Debug, Default)]
pub struct ConversationDirectory {
    conversations: Vec<Conversation>,
}

impl ConversationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wholesale replacement on a directory refresh. Conversations absent from
    /// the new set are dropped; there are no tombstones.
    pub fn replace_all(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }

    pub fn contains(&self, conversation_id: &str) -> bool {
        self.get(conversation_id).is_some()
    }

    /// Update the last-message preview for a conversation. No-op when the
    /// conversation is not in the directory.
    pub fn touch(&mut self, conversation_id: &str, preview: &str, at: u64) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.touch(preview, at);
        }
    }

    pub fn increment_unread(&mut self, conversation_id: &str) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.unread_count += 1;
        }
    }

    /// Idempotent: always leaves the count at zero.
    pub fn mark_read(&mut self, conversation_id: &str) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.unread_count = 0;
        }
    }

    fn get_mut(&mut self, conversation_id: &str) -> Option<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
    }
}
