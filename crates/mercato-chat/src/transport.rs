use anyhow::{Context, Result};

use crate::models::{Attachment, Conversation, Message, WireConversation, WireMessage};

/// REST boundary the chat core talks to. Implementations reject on failure;
/// the session layer turns a rejection into message state, never into a
/// propagated error.
pub trait Transport {
    /// Send a message; resolves to the server's canonical payload.
    fn send_message(
        &self,
        conversation_id: &str,
        content: &str,
        attachments: &[Attachment],
    ) -> impl std::future::Future<Output = Result<WireMessage>> + Send;

    fn fetch_conversations(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>>> + Send;

    /// Messages for a conversation, oldest-first.
    fn fetch_messages(
        &self,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>>> + Send;
}

/// Marketplace REST API client.
pub struct HttpTransport {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("chat API error ({}): {}", status, error_text);
        }
        Ok(response)
    }
}

impl Transport for HttpTransport {
    async fn send_message(
        &self,
        conversation_id: &str,
        content: &str,
        attachments: &[Attachment],
    ) -> Result<WireMessage> {
        let url = format!("{}/conversations/{}/messages", self.base_url, conversation_id);
        let body = serde_json::json!({
            "content": content,
            "attachments": attachments,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .json(&body)
            .send()
            .await
            .context("Failed to send message")?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .context("Failed to parse send response")
    }

    async fn fetch_conversations(&self) -> Result<Vec<Conversation>> {
        let url = format!("{}/conversations", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .send()
            .await
            .context("Failed to fetch conversations")?;
        let response = Self::check(response).await?;

        let wire: Vec<WireConversation> = response
            .json()
            .await
            .context("Failed to parse conversations response")?;
        Ok(wire.into_iter().map(Conversation::from_wire).collect())
    }

    async fn fetch_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let url = format!("{}/conversations/{}/messages", self.base_url, conversation_id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .send()
            .await
            .context("Failed to fetch messages")?;
        let response = Self::check(response).await?;

        let wire: Vec<WireMessage> = response
            .json()
            .await
            .context("Failed to parse messages response")?;
        Ok(into_oldest_first(wire))
    }
}

/// The endpoint returns newest-first; the store consumes oldest-first.
/// Payloads with a status outside the closed set are dropped.
fn into_oldest_first(mut wire: Vec<WireMessage>) -> Vec<Message> {
    wire.reverse();
    wire.into_iter().filter_map(Message::from_wire).collect()
}
