use crate::models::message::Attachment;

/// Compose-box state for the current conversation. Exactly one per session;
/// cleared immediately on submit, before the network call resolves.
#[derive(Debug, Clone, Default)]
pub struct MessageDraft {
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// Set by the session layer while the submit network call is in flight.
    pub is_loading: bool,
}

impl MessageDraft {
    /// A draft is sendable when it has text or at least one attachment.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.attachments.is_empty()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Take the draft for sending, leaving an empty compose box behind.
    /// `is_loading` is preserved; the session layer owns that flag.
    pub fn take(&mut self) -> (String, Vec<Attachment>) {
        (
            std::mem::take(&mut self.content),
            std::mem::take(&mut self.attachments),
        )
    }
}
