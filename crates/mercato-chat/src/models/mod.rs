pub mod conversation;
pub mod draft;
pub mod message;

pub use conversation::{Conversation, Participant, WireConversation};
pub use draft::MessageDraft;
pub use message::{Attachment, AttachmentKind, Message, MessageStatus, WireMessage};
