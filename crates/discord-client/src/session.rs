//! `Session` implementation over the REST client.

use crate::client::DiscordClient;
use crate::error::DiscordError;
use async_trait::async_trait;
use interactions::{
    ChannelId, ChannelProfile, GuildId, GuildProfile, Session, TransportError, UserId,
    UserProfile,
};

impl From<DiscordError> for TransportError {
    fn from(error: DiscordError) -> Self {
        TransportError::new(error.to_string())
    }
}

#[async_trait]
impl Session for DiscordClient {
    async fn respond(
        &self,
        interaction_id: u64,
        token: &str,
        content: &str,
        ephemeral: bool,
    ) -> Result<(), TransportError> {
        self.create_response(interaction_id, token, content, ephemeral)
            .await
            .map_err(Into::into)
    }

    async fn defer(
        &self,
        interaction_id: u64,
        token: &str,
        ephemeral: bool,
    ) -> Result<(), TransportError> {
        self.create_deferred(interaction_id, token, ephemeral)
            .await
            .map_err(Into::into)
    }

    async fn edit_response(&self, token: &str, content: &str) -> Result<(), TransportError> {
        self.edit_original(token, content).await.map_err(Into::into)
    }

    async fn follow_up(&self, token: &str, content: &str) -> Result<(), TransportError> {
        self.create_followup(token, content).await.map_err(Into::into)
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<(), TransportError> {
        DiscordClient::send_message(self, channel_id, content)
            .await
            .map_err(Into::into)
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<UserProfile, TransportError> {
        let user = self.get_user(user_id).await?;
        Ok(UserProfile {
            id: user.id,
            username: user.username,
            display_name: user.global_name,
            bot: user.bot,
            avatar: user.avatar,
        })
    }

    async fn fetch_guild(&self, guild_id: GuildId) -> Result<GuildProfile, TransportError> {
        let guild = self.get_guild(guild_id).await?;
        Ok(GuildProfile {
            id: guild.id,
            name: guild.name,
        })
    }

    async fn fetch_channel(
        &self,
        channel_id: ChannelId,
    ) -> Result<ChannelProfile, TransportError> {
        let channel = self.get_channel(channel_id).await?;
        Ok(ChannelProfile {
            id: channel.id,
            name: channel.name,
        })
    }
}
