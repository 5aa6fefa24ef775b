use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::WireMessage;

/// Parsed frame from the realtime channel. Frames are JSON objects tagged by
/// `kind`; delivery is assumed ordered within one conversation but not across
/// conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RealtimeEvent {
    /// A new message, or the server echo of one of our own sends.
    #[serde(rename_all = "camelCase")]
    Received { message: WireMessage },

    #[serde(rename_all = "camelCase")]
    Edited {
        conversation_id: String,
        message_id: String,
        content: String,
        edited_at: u64,
    },

    #[serde(rename_all = "camelCase")]
    Deleted {
        conversation_id: String,
        message_id: String,
        deleted_at: u64,
    },

    /// Server-side delivery status update; `status` is normalized against the
    /// closed status set when applied.
    #[serde(rename_all = "camelCase")]
    StatusChanged {
        conversation_id: String,
        message_id: String,
        status: String,
    },
}

impl RealtimeEvent {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse realtime frame")
    }

    pub fn conversation_id(&self) -> &str {
        match self {
            RealtimeEvent::Received { message } => &message.conversation_id,
            RealtimeEvent::Edited {
                conversation_id, ..
            }
            | RealtimeEvent::Deleted {
                conversation_id, ..
            }
            | RealtimeEvent::StatusChanged {
                conversation_id, ..
            } => conversation_id,
        }
    }
}
