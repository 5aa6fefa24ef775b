use tracing::{debug, warn};

use crate::error::ChatError;
use crate::ids::{new_temp_id, now_ms};
use crate::models::{Conversation, Message, MessageDraft, MessageStatus, Participant, WireMessage};
use crate::store::directory::ConversationDirectory;
use crate::store::events::RealtimeEvent;
use crate::store::timeline::Timeline;
use crate::store::typing::TypingRegistry;

/// Single source of truth for the chat feature: conversation directory,
/// timeline of the open conversation, typing registry, and the compose draft.
///
/// All transitions are synchronous and non-preemptible; the only concurrency
/// in the design is the temporal interleaving of the event sources that call
/// into this store. Cross-cutting updates (a send touching both timeline and
/// directory) happen inside one method so no torn state is observable.
pub struct ChatStore {
    directory: ConversationDirectory,
    timeline: Timeline,
    typing: TypingRegistry,
    draft: MessageDraft,
    open_conversation_id: Option<String>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self {
            directory: ConversationDirectory::new(),
            timeline: Timeline::new(),
            typing: TypingRegistry::new(),
            draft: MessageDraft::default(),
            open_conversation_id: None,
        }
    }

    // --- Directory ---

    pub fn replace_conversations(&mut self, conversations: Vec<Conversation>) {
        debug!("replace_conversations: {} conversations", conversations.len());
        self.directory.replace_all(conversations);
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.directory.conversations()
    }

    pub fn mark_read(&mut self, conversation_id: &str) {
        self.directory.mark_read(conversation_id);
    }

    // --- Open conversation / timeline ---

    /// Open a conversation and hydrate its timeline, oldest-first. Opening
    /// never resets the unread count; only `mark_read` does.
    pub fn open_conversation(&mut self, conversation_id: &str, messages: Vec<Message>) {
        debug!(
            "open_conversation: {} with {} messages",
            conversation_id,
            messages.len()
        );
        self.open_conversation_id = Some(conversation_id.to_string());
        self.timeline.load(messages);
    }

    pub fn close_conversation(&mut self) {
        self.open_conversation_id = None;
        self.timeline.clear();
    }

    pub fn open_conversation_id(&self) -> Option<&str> {
        self.open_conversation_id.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        self.timeline.messages()
    }

    // --- Draft ---

    pub fn draft(&self) -> &MessageDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MessageDraft {
        &mut self.draft
    }

    // --- Optimistic send pipeline ---

    /// Create a pending message from the current draft, append it to the
    /// timeline, update the directory preview, and clear the draft. Returns
    /// the generated temp id; the caller issues the network call and reports
    /// back exactly once via `confirm` or `fail`.
    pub fn submit(
        &mut self,
        conversation_id: &str,
        sender: &Participant,
    ) -> Result<String, ChatError> {
        if self.draft.is_empty() {
            return Err(ChatError::EmptyDraft);
        }
        if !self.directory.contains(conversation_id) {
            return Err(ChatError::UnknownConversation {
                conversation_id: conversation_id.to_string(),
            });
        }

        let (content, media) = self.draft.take();
        let temp_id = new_temp_id();
        let sent_at = now_ms();
        let preview = preview_text(&content, !media.is_empty()).to_string();

        let message = Message {
            id: temp_id.clone(),
            temp_id: Some(temp_id.clone()),
            conversation_id: conversation_id.to_string(),
            sender_id: sender.id.clone(),
            content,
            media,
            status: MessageStatus::Pending,
            sent_at,
            edited_at: None,
            deleted_at: None,
            is_deleted: false,
            last_error: None,
        };

        // The timeline only holds the open conversation; a send targeted at
        // another conversation still updates the directory preview.
        let targets_timeline = self
            .open_conversation_id
            .as_deref()
            .map_or(true, |open| open == conversation_id);
        if targets_timeline {
            self.timeline.append(message);
        }
        self.directory.touch(conversation_id, &preview, sent_at);

        debug!("submit: created {} in {}", temp_id, conversation_id);
        Ok(temp_id)
    }

    /// Apply the transport's success response. A stale temp id (already
    /// retried or discarded) is a benign no-op.
    pub fn confirm(&mut self, temp_id: &str, server: Option<WireMessage>) {
        let Some(entry) = self.timeline.find_by_temp_id_mut(temp_id) else {
            debug!("confirm: {} no longer present, ignoring", temp_id);
            return;
        };

        match server.and_then(Message::from_wire) {
            Some(mut canonical) => {
                canonical.temp_id = Some(temp_id.to_string());
                canonical.status = MessageStatus::Sent;
                *entry = canonical;
            }
            None => {
                entry.status = MessageStatus::Sent;
                entry.last_error = None;
            }
        }
        debug!("confirm: {} is now sent", temp_id);
    }

    /// Apply the transport's failure. The message stays in the timeline so
    /// the user can retry or discard it.
    pub fn fail(&mut self, temp_id: &str, error: impl Into<String>) {
        let Some(entry) = self.timeline.find_by_temp_id_mut(temp_id) else {
            debug!("fail: {} no longer present, ignoring", temp_id);
            return;
        };
        entry.status = MessageStatus::Failed;
        entry.last_error = Some(error.into());
        warn!("fail: {} marked failed", temp_id);
    }

    /// Re-arm a failed send: new temp id (kept equal to `id` until the server
    /// supplies a canonical one), status back to pending, fresh timestamp.
    /// Content and media are unchanged. Returns `None` unless the entry
    /// exists and is failed.
    pub fn retry(&mut self, temp_id: &str) -> Option<String> {
        let entry = self.timeline.find_by_temp_id_mut(temp_id)?;
        if entry.status != MessageStatus::Failed {
            warn!("retry: {} is not failed, ignoring", temp_id);
            return None;
        }

        let new_id = new_temp_id();
        entry.id = new_id.clone();
        entry.temp_id = Some(new_id.clone());
        entry.status = MessageStatus::Pending;
        entry.sent_at = now_ms();
        entry.last_error = None;
        debug!("retry: {} re-armed as {}", temp_id, new_id);
        Some(new_id)
    }

    /// Remove a failed send from the timeline. The directory preview from the
    /// original optimistic send is not retracted. Returns `false` unless the
    /// entry exists and is failed.
    pub fn discard(&mut self, temp_id: &str) -> bool {
        let failed = self
            .timeline
            .find_by_temp_id_mut(temp_id)
            .map(|m| m.status == MessageStatus::Failed);
        match failed {
            Some(true) => {
                self.timeline.remove_by_temp_id(temp_id);
                debug!("discard: removed {}", temp_id);
                true
            }
            Some(false) => {
                warn!("discard: {} is not failed, ignoring", temp_id);
                false
            }
            None => false,
        }
    }

    // --- Realtime reconciliation ---

    /// Merge an inbound realtime event into local state.
    pub fn handle_event(&mut self, event: RealtimeEvent, current_user_id: &str) {
        match event {
            RealtimeEvent::Received { message } => self.handle_received(message, current_user_id),
            RealtimeEvent::Edited {
                conversation_id,
                message_id,
                content,
                edited_at,
            } => {
                // Only the open conversation is resident in memory.
                if self.open_conversation_id.as_deref() != Some(conversation_id.as_str()) {
                    return;
                }
                if let Some(entry) = self.timeline.find_by_id_mut(&message_id) {
                    entry.content = content;
                    entry.edited_at = Some(edited_at);
                }
            }
            RealtimeEvent::Deleted {
                conversation_id,
                message_id,
                deleted_at,
            } => {
                if self.open_conversation_id.as_deref() != Some(conversation_id.as_str()) {
                    return;
                }
                if let Some(entry) = self.timeline.find_by_id_mut(&message_id) {
                    // Content is retained so a placeholder can be rendered.
                    entry.is_deleted = true;
                    entry.deleted_at = Some(deleted_at);
                }
            }
            RealtimeEvent::StatusChanged {
                conversation_id,
                message_id,
                status,
            } => {
                if self.open_conversation_id.as_deref() != Some(conversation_id.as_str()) {
                    return;
                }
                let Some(status) = MessageStatus::from_wire(&status) else {
                    warn!("statusChanged: unknown status '{}', dropping", status);
                    return;
                };
                if let Some(entry) = self.timeline.find_by_id_mut(&message_id) {
                    entry.status = status;
                }
            }
        }
    }

    fn handle_received(&mut self, wire: WireMessage, current_user_id: &str) {
        let is_own_echo = wire.sender_id == current_user_id;
        let conversation_id = wire.conversation_id.clone();
        let is_open = self.open_conversation_id.as_deref() == Some(conversation_id.as_str());

        let sent_at = wire.sent_at;
        let content = wire.content.clone().unwrap_or_default();
        let has_media = !wire.media.is_empty();
        let preview = preview_text(&content, has_media).to_string();

        let Some(incoming) = Message::from_wire(wire) else {
            warn!("received: message with unknown status, dropping");
            return;
        };

        if is_open {
            match self
                .timeline
                .find_echo_match(&incoming.sender_id, &content, has_media)
            {
                Some(idx) => {
                    debug!("received: matched optimistic entry for {}", incoming.id);
                    self.timeline.replace_at(idx, incoming);
                }
                None if !is_own_echo => {
                    self.timeline.append(incoming);
                }
                None => {
                    // Own echo with no optimistic match: only append when the
                    // confirmation path has not already landed this id.
                    if !self.timeline.contains_id(&incoming.id) {
                        self.timeline.append(incoming);
                    }
                }
            }
        }

        self.directory.touch(&conversation_id, &preview, sent_at);
        if !is_own_echo && !is_open {
            self.directory.increment_unread(&conversation_id);
        }
    }

    // --- Typing indicators ---

    pub fn typing_start(&mut self, conversation_id: &str, user_id: &str) {
        self.typing.start(conversation_id, user_id);
    }

    pub fn typing_stop(&mut self, conversation_id: &str, user_id: &str) {
        self.typing.stop(conversation_id, user_id);
    }

    pub fn typing_users(&self, conversation_id: &str) -> Vec<&str> {
        self.typing.typing_users(conversation_id)
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

fn preview_text(content: &str, has_media: bool) -> &str {
    if content.is_empty() && has_media {
        "[attachment]"
    } else {
        content
    }
}
