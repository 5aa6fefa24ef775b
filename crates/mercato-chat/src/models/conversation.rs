use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Directory-level summary of a conversation. The full message timeline lives
/// in the timeline store and only for the conversation currently open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub participants: Vec<Participant>,
    pub last_message: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub last_message_at: Option<u64>,
    pub unread_count: u32,
}

impl Conversation {
    pub fn from_wire(wire: WireConversation) -> Self {
        Conversation {
            id: wire.id,
            participants: wire.participants,
            last_message: wire.last_message,
            last_message_at: wire.last_message_at,
            unread_count: wire.unread_count,
        }
    }

    /// Update the preview fields after a message was sent or received for this
    /// conversation.
    pub fn touch(&mut self, preview: &str, at: u64) {
        self.last_message = Some(preview.to_string());
        self.last_message_at = Some(at);
    }
}

/// Conversation summary as the REST directory endpoint delivers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireConversation {
    pub id: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<u64>,
    #[serde(default)]
    pub unread_count: u32,
}
