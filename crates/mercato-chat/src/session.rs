use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::ChatError;
use crate::models::Participant;
use crate::store::{ChatStore, RealtimeEvent};
use crate::transport::Transport;

/// Ties the synchronous store to the async transport. Each send produces
/// exactly one `confirm` or `fail` on the store; the store lock is never held
/// across an await.
pub struct ChatSession<T: Transport> {
    store: Arc<RwLock<ChatStore>>,
    transport: T,
    current_user: Participant,
}

impl<T: Transport> ChatSession<T> {
    pub fn new(transport: T, current_user: Participant) -> Self {
        Self {
            store: Arc::new(RwLock::new(ChatStore::new())),
            transport,
            current_user,
        }
    }

    pub fn store(&self) -> Arc<RwLock<ChatStore>> {
        Arc::clone(&self.store)
    }

    pub fn current_user(&self) -> &Participant {
        &self.current_user
    }

    pub async fn refresh_conversations(&self) -> Result<()> {
        let conversations = self.transport.fetch_conversations().await?;
        self.store.write().replace_conversations(conversations);
        Ok(())
    }

    /// Fetch and hydrate a conversation's timeline. Does not touch the unread
    /// count; call `mark_read` explicitly.
    pub async fn open(&self, conversation_id: &str) -> Result<()> {
        let messages = self.transport.fetch_messages(conversation_id).await?;
        self.store
            .write()
            .open_conversation(conversation_id, messages);
        Ok(())
    }

    pub fn mark_read(&self, conversation_id: &str) {
        self.store.write().mark_read(conversation_id);
    }

    /// Submit the current draft and drive the network attempt. Precondition
    /// failures (empty draft, unknown conversation) come back as errors;
    /// transport failures surface only as message state.
    pub async fn send(&self, conversation_id: &str) -> Result<String, ChatError> {
        let (temp_id, content, attachments) = {
            let mut store = self.store.write();
            let content = store.draft().content.clone();
            let attachments = store.draft().attachments.clone();
            let temp_id = store.submit(conversation_id, &self.current_user)?;
            store.draft_mut().is_loading = true;
            (temp_id, content, attachments)
        };

        debug!("send: {} -> {}", temp_id, conversation_id);
        let outcome = self
            .transport
            .send_message(conversation_id, &content, &attachments)
            .await;

        let mut store = self.store.write();
        store.draft_mut().is_loading = false;
        match outcome {
            Ok(server) => store.confirm(&temp_id, Some(server)),
            Err(err) => {
                warn!("send: {} failed: {:#}", temp_id, err);
                store.fail(&temp_id, err.to_string());
            }
        }
        Ok(temp_id)
    }

    /// Re-issue a failed send. Returns the new temp id, or `None` when the
    /// entry is missing or not failed.
    pub async fn resend(&self, temp_id: &str) -> Option<String> {
        let (new_id, conversation_id, content, attachments) = {
            let mut store = self.store.write();
            let new_id = store.retry(temp_id)?;
            let entry = store
                .messages()
                .iter()
                .find(|m| m.temp_id.as_deref() == Some(new_id.as_str()))?;
            (
                new_id.clone(),
                entry.conversation_id.clone(),
                entry.content.clone(),
                entry.media.clone(),
            )
        };

        debug!("resend: {} as {}", temp_id, new_id);
        let outcome = self
            .transport
            .send_message(&conversation_id, &content, &attachments)
            .await;

        let mut store = self.store.write();
        match outcome {
            Ok(server) => store.confirm(&new_id, Some(server)),
            Err(err) => {
                warn!("resend: {} failed: {:#}", new_id, err);
                store.fail(&new_id, err.to_string());
            }
        }
        Some(new_id)
    }

    pub fn discard(&self, temp_id: &str) -> bool {
        self.store.write().discard(temp_id)
    }

    /// Merge a parsed realtime event.
    pub fn handle_realtime(&self, event: RealtimeEvent) {
        self.store.write().handle_event(event, &self.current_user.id);
    }

    /// Merge a raw realtime frame. Malformed frames are reported to the
    /// caller; they never corrupt store state.
    pub fn handle_realtime_json(&self, raw: &str) -> Result<()> {
        let event = RealtimeEvent::from_json(raw)?;
        self.handle_realtime(event);
        Ok(())
    }

    pub fn typing_start(&self, conversation_id: &str, user_id: &str) {
        self.store.write().typing_start(conversation_id, user_id);
    }

    pub fn typing_stop(&self, conversation_id: &str, user_id: &str) {
        self.store.write().typing_stop(conversation_id, user_id);
    }
}
