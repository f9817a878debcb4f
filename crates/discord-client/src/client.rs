//! Discord HTTP client.

use crate::error::DiscordError;
use crate::types::*;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Discord REST API client.
///
/// Wraps the interaction response endpoints plus the ancillary calls the bot
/// needs. The bot token is stored as a `SecretString` to keep it out of
/// debug output; interaction callbacks and webhook calls authenticate via
/// the per-interaction token instead.
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
    base_url: String,
    token: SecretString,
    application_id: u64,
}

impl DiscordClient {
    /// Create a new client. `base_url` is the API root, normally
    /// `https://discord.com/api/v10`; tests point it at a mock server.
    pub fn new(
        token: impl Into<String>,
        application_id: u64,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DiscordError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: SecretString::new(token.into()),
            application_id,
        })
    }

    pub fn application_id(&self) -> u64 {
        self.application_id
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token.expose_secret())
    }

    /// Check that the API root is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/gateway", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Send the initial interaction response (final content).
    #[instrument(skip(self, token, content))]
    pub async fn create_response(
        &self,
        interaction_id: u64,
        token: &str,
        content: &str,
        ephemeral: bool,
    ) -> Result<(), DiscordError> {
        let body = InteractionResponse {
            kind: CALLBACK_CHANNEL_MESSAGE,
            data: Some(CallbackData {
                content: Some(content.to_string()),
                flags: ephemeral.then_some(MESSAGE_FLAG_EPHEMERAL),
            }),
        };
        self.post_callback(interaction_id, token, &body).await
    }

    /// Send a deferred acknowledgment (placeholder, content arrives later).
    #[instrument(skip(self, token))]
    pub async fn create_deferred(
        &self,
        interaction_id: u64,
        token: &str,
        ephemeral: bool,
    ) -> Result<(), DiscordError> {
        // The placeholder carries no content; only the ephemeral flag needs
        // a data object at all.
        let body = InteractionResponse {
            kind: CALLBACK_DEFERRED_CHANNEL_MESSAGE,
            data: ephemeral.then(|| CallbackData {
                content: None,
                flags: Some(MESSAGE_FLAG_EPHEMERAL),
            }),
        };
        self.post_callback(interaction_id, token, &body).await
    }

    /// Edit the original (deferred) response. Last write wins.
    #[instrument(skip(self, token, content))]
    pub async fn edit_original(&self, token: &str, content: &str) -> Result<(), DiscordError> {
        let response = self
            .client
            .patch(format!(
                "{}/webhooks/{}/{}/messages/@original",
                self.base_url, self.application_id, token
            ))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Send a follow-up message for an acknowledged interaction.
    #[instrument(skip(self, token, content))]
    pub async fn create_followup(&self, token: &str, content: &str) -> Result<(), DiscordError> {
        let response = self
            .client
            .post(format!(
                "{}/webhooks/{}/{}",
                self.base_url, self.application_id, token
            ))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Send a plain channel message, unrelated to any interaction.
    #[instrument(skip(self, content))]
    pub async fn send_message(&self, channel_id: u64, content: &str) -> Result<(), DiscordError> {
        let response = self
            .client
            .post(format!("{}/channels/{}/messages", self.base_url, channel_id))
            .header("Authorization", self.auth())
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        Self::check(response).await?;
        debug!(channel = channel_id, "sent channel message");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: u64) -> Result<User, DiscordError> {
        let response = self
            .client
            .get(format!("{}/users/{}", self.base_url, user_id))
            .header("Authorization", self.auth())
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: u64) -> Result<Channel, DiscordError> {
        let response = self
            .client
            .get(format!("{}/channels/{}", self.base_url, channel_id))
            .header("Authorization", self.auth())
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_guild(&self, guild_id: u64) -> Result<Guild, DiscordError> {
        let response = self
            .client
            .get(format!("{}/guilds/{}", self.base_url, guild_id))
            .header("Authorization", self.auth())
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_callback(
        &self,
        interaction_id: u64,
        token: &str,
        body: &InteractionResponse,
    ) -> Result<(), DiscordError> {
        let response = self
            .client
            .post(format!(
                "{}/interactions/{}/{}/callback",
                self.base_url, interaction_id, token
            ))
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: Response) -> Result<Response, DiscordError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("rate limited by Discord API");
            return Err(DiscordError::RateLimited);
        }
        let message = response.text().await.unwrap_or_default();
        Err(DiscordError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
