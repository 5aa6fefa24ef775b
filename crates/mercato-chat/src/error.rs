use thiserror::Error;

/// Errors returned by store operations with caller-side preconditions.
///
/// Transport failures never surface here; they are represented as message
/// state (`MessageStatus::Failed`), not as propagated errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Submit requires text content or at least one attachment.
    #[error("draft has no content and no attachments")]
    EmptyDraft,

    /// Submit targeted a conversation the directory does not know about.
    #[error("unknown conversation '{conversation_id}'")]
    UnknownConversation { conversation_id: String },
}
