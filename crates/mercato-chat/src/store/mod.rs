pub mod chat_store;
pub mod directory;
pub mod events;
pub mod timeline;
pub mod typing;

pub use chat_store::ChatStore;
pub use directory::ConversationDirectory;
pub use events::RealtimeEvent;
pub use timeline::Timeline;
pub use typing::TypingRegistry;
