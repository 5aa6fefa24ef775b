use serde::{Deserialize, Serialize};

/// Delivery state of a message as seen by the local client.
///
/// Wire payloads carry the status as a free-form string; [`MessageStatus::from_wire`]
/// is the only place that string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    /// Created locally, no server confirmation yet.
    Pending,
    /// Confirmed by the server (or delivered by the realtime channel).
    Sent,
    /// The transport reported a failure; the message stays visible for retry/discard.
    Failed,
}

impl MessageStatus {
    /// Normalize an externally-supplied status string. Unknown values are rejected
    /// rather than stored.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "SENT" => Some(Self::Sent),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    File,
}

/// Media attached to a message, already uploaded and addressable by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub kind: AttachmentKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    /// Client-generated correlation id. Present on every locally-created message
    /// and retained after confirmation so a late realtime echo can still be
    /// matched and ignored. Never sent to other participants.
    pub temp_id: Option<String>,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub media: Vec<Attachment>,
    pub status: MessageStatus,
    /// Milliseconds since the Unix epoch.
    pub sent_at: u64,
    pub edited_at: Option<u64>,
    pub deleted_at: Option<u64>,
    /// Content is retained when set, so a placeholder can be rendered; consumers
    /// must check this flag before displaying `content`.
    pub is_deleted: bool,
    /// Last transport error, set when `status == Failed`.
    pub last_error: Option<String>,
}

impl Message {
    /// Build a message from a server payload. Returns `None` when the payload
    /// carries a status outside the closed set.
    pub fn from_wire(wire: WireMessage) -> Option<Self> {
        let status = match wire.status.as_deref() {
            Some(raw) => MessageStatus::from_wire(raw)?,
            None => MessageStatus::Sent,
        };

        Some(Message {
            id: wire.id,
            temp_id: None,
            conversation_id: wire.conversation_id,
            sender_id: wire.sender_id,
            content: wire.content.unwrap_or_default(),
            media: wire.media,
            status,
            sent_at: wire.sent_at,
            edited_at: wire.edited_at,
            deleted_at: wire.deleted_at,
            is_deleted: wire.is_deleted,
            last_error: None,
        })
    }

    /// True when this is an unconfirmed or failed local send that can still be
    /// correlated against a server echo.
    pub fn is_optimistic(&self) -> bool {
        self.temp_id.is_some()
    }
}

/// Message payload as the REST and realtime channels deliver it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessage {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub media: Vec<Attachment>,
    #[serde(default)]
    pub status: Option<String>,
    pub sent_at: u64,
    #[serde(default)]
    pub edited_at: Option<u64>,
    #[serde(default)]
    pub deleted_at: Option<u64>,
    #[serde(default)]
    pub is_deleted: bool,
}
