//! Message composition and delivery reconciliation engine for the Mercato
//! marketplace client.
//!
//! The store owns optimistic local message creation, confirmation/failure of
//! in-flight sends, reconciliation of realtime delivery events against
//! optimistic entries, typing indicators, and unread-count bookkeeping. The
//! session layer wires the store to a REST transport.

pub mod error;
pub mod ids;
pub mod models;
pub mod session;
pub mod store;
pub mod transport;

pub use error::ChatError;
pub use models::{
    Attachment, AttachmentKind, Conversation, Message, MessageDraft, MessageStatus, Participant,
    WireConversation, WireMessage,
};
pub use session::ChatSession;
pub use store::{ChatStore, RealtimeEvent};
pub use transport::{HttpTransport, Transport};
