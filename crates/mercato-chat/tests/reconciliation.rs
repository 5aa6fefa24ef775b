//! End-to-end walks through the send/reconcile lifecycle: optimistic submit,
//! confirmation, failure/retry/discard, unread bookkeeping, typing, and the
//! echo-before-confirm race.

use anyhow::Result;
use mercato_chat::models::{Conversation, Participant, WireMessage};
use mercato_chat::store::RealtimeEvent;
use mercato_chat::{ChatSession, ChatStore, MessageStatus, Transport};
use parking_lot::Mutex;
use std::collections::VecDeque;

fn conv(id: &str) -> Conversation {
    Conversation {
        id: id.into(),
        participants: vec![],
        last_message: None,
        last_message_at: None,
        unread_count: 0,
    }
}

fn user(id: &str) -> Participant {
    Participant {
        id: id.into(),
        display_name: id.to_uppercase(),
        avatar_url: None,
    }
}

fn wire(id: &str, conversation: &str, sender: &str, content: &str) -> WireMessage {
    WireMessage {
        id: id.into(),
        conversation_id: conversation.into(),
        sender_id: sender.into(),
        content: Some(content.into()),
        media: vec![],
        status: None,
        sent_at: 5000,
        edited_at: None,
        deleted_at: None,
        is_deleted: false,
    }
}

fn seeded_store() -> (ChatStore, Participant) {
    let mut store = ChatStore::new();
    store.replace_conversations(vec![conv("c1"), conv("c2")]);
    store.open_conversation("c1", vec![]);
    (store, user("u1"))
}

#[test]
fn submit_then_confirm_keeps_position_and_temp_id() {
    let (mut store, sender) = seeded_store();

    store.draft_mut().set_content("hi");
    let t1 = store.submit("c1", &sender).unwrap();

    assert_eq!(store.messages().len(), 1);
    assert_eq!(store.messages()[0].status, MessageStatus::Pending);
    let c1 = store.conversations().iter().find(|c| c.id == "c1").unwrap();
    assert_eq!(c1.last_message.as_deref(), Some("hi"));

    store.confirm(&t1, Some(wire("srv-99", "c1", "u1", "hi")));
    let msg = &store.messages()[0];
    assert_eq!(msg.id, "srv-99");
    assert_eq!(msg.temp_id.as_deref(), Some(t1.as_str()));
    assert_eq!(msg.status, MessageStatus::Sent);
}

#[test]
fn failed_send_can_be_retried_then_discarded() {
    let (mut store, sender) = seeded_store();

    store.draft_mut().set_content("hi");
    let t1 = store.submit("c1", &sender).unwrap();
    store.fail(&t1, "network down");
    assert_eq!(store.messages()[0].status, MessageStatus::Failed);

    let t2 = store.retry(&t1).unwrap();
    assert_eq!(store.messages()[0].status, MessageStatus::Pending);
    assert_eq!(store.messages()[0].content, "hi");

    // Discard is only valid once the new attempt itself fails.
    assert!(!store.discard(&t2));
    store.fail(&t2, "still down");
    assert!(store.discard(&t2));
    assert!(store.messages().is_empty());
}

#[test]
fn message_for_closed_conversation_only_bumps_unread() {
    let (mut store, _) = seeded_store();

    store.handle_event(
        RealtimeEvent::Received {
            message: wire("srv-1", "c2", "u2", "yo"),
        },
        "u1",
    );

    assert!(store.messages().is_empty(), "c1 timeline must be untouched");
    let c2 = store.conversations().iter().find(|c| c.id == "c2").unwrap();
    assert_eq!(c2.unread_count, 1);
    assert_eq!(c2.last_message.as_deref(), Some("yo"));
}

#[test]
fn typing_start_is_idempotent() {
    let (mut store, _) = seeded_store();
    store.typing_start("c1", "u2");
    store.typing_start("c1", "u2");
    assert_eq!(store.typing_users("c1"), ["u2"]);
    store.typing_stop("c1", "u2");
    assert!(store.typing_users("c1").is_empty());
}

/// Scenario 6: the realtime echo for our own send lands before the transport
/// response. The matcher must merge it into the optimistic entry, and the
/// late confirmation must not duplicate it.
#[test]
fn echo_before_confirm_never_duplicates() {
    let (mut store, sender) = seeded_store();

    store.draft_mut().set_content("hi");
    let t1 = store.submit("c1", &sender).unwrap();

    store.handle_event(
        RealtimeEvent::Received {
            message: wire("srv-7", "c1", "u1", "hi"),
        },
        "u1",
    );
    assert_eq!(store.messages().len(), 1);
    assert_eq!(store.messages()[0].id, "srv-7");
    assert_eq!(store.messages()[0].status, MessageStatus::Sent);

    // Late confirmation for the same attempt.
    store.confirm(&t1, Some(wire("srv-7", "c1", "u1", "hi")));
    assert_eq!(store.messages().len(), 1);
    assert_eq!(store.messages()[0].id, "srv-7");
}

// --- Async session walk with a scripted transport ---

#[derive(Default)]
struct ScriptedTransport {
    send_results: Mutex<VecDeque<Result<WireMessage>>>,
    conversations: Vec<Conversation>,
}

impl Transport for ScriptedTransport {
    async fn send_message(
        &self,
        _conversation_id: &str,
        _content: &str,
        _attachments: &[mercato_chat::Attachment],
    ) -> Result<WireMessage> {
        self.send_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no queued response")))
    }

    async fn fetch_conversations(&self) -> Result<Vec<Conversation>> {
        Ok(self.conversations.clone())
    }

    async fn fetch_messages(&self, _conversation_id: &str) -> Result<Vec<mercato_chat::Message>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn full_send_lifecycle_through_session() {
    let transport = ScriptedTransport {
        conversations: vec![conv("c1"), conv("c2")],
        ..Default::default()
    };
    transport
        .send_results
        .lock()
        .push_back(Err(anyhow::anyhow!("503 service unavailable")));
    transport
        .send_results
        .lock()
        .push_back(Ok(wire("srv-10", "c1", "u1", "are you still selling this?")));

    let session = ChatSession::new(transport, user("u1"));
    session.refresh_conversations().await.unwrap();
    session.open("c1").await.unwrap();

    session
        .store()
        .write()
        .draft_mut()
        .set_content("are you still selling this?");
    let t1 = session.send("c1").await.unwrap();

    {
        let store = session.store();
        let store = store.read();
        assert_eq!(store.messages()[0].status, MessageStatus::Failed);
    }

    let t2 = session.resend(&t1).await.unwrap();
    assert_ne!(t1, t2);

    let store = session.store();
    let store = store.read();
    assert_eq!(store.messages().len(), 1);
    assert_eq!(store.messages()[0].id, "srv-10");
    assert_eq!(store.messages()[0].status, MessageStatus::Sent);

    // A realtime event for the other conversation while c1 stays open.
    drop(store);
    session.handle_realtime(RealtimeEvent::Received {
        message: wire("srv-11", "c2", "u2", "offer accepted"),
    });
    let store = session.store();
    let store = store.read();
    let c2 = store.conversations().iter().find(|c| c.id == "c2").unwrap();
    assert_eq!(c2.unread_count, 1);
}
