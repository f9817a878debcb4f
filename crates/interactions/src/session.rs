//! Platform session interface consumed by the responder and handlers.

use crate::error::TransportError;
use crate::event::{ChannelId, GuildId, UserId};
use async_trait::async_trait;

/// A user profile as seen through the platform's ancillary fetch call.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub display_name: Option<String>,
    pub bot: bool,
    pub avatar: Option<String>,
}

/// A channel profile as seen through the platform's ancillary fetch call.
#[derive(Debug, Clone)]
pub struct ChannelProfile {
    pub id: ChannelId,
    pub name: Option<String>,
}

/// A guild profile as seen through the platform's ancillary fetch call.
#[derive(Debug, Clone)]
pub struct GuildProfile {
    pub id: GuildId,
    pub name: String,
}

/// The platform's response primitives, treated as opaque RPCs.
///
/// The four acknowledgment calls take the interaction's id/token credentials;
/// state sequencing is the responder's job, not the session's. Every failure
/// is surfaced as a [`TransportError`] and implies nothing about local state.
#[async_trait]
pub trait Session: Send + Sync {
    /// Immediate final reply. Must happen inside the platform's short
    /// acknowledgment window.
    async fn respond(
        &self,
        interaction_id: u64,
        token: &str,
        content: &str,
        ephemeral: bool,
    ) -> Result<(), TransportError>;

    /// Acknowledge without content, buying the extended delivery window.
    async fn defer(
        &self,
        interaction_id: u64,
        token: &str,
        ephemeral: bool,
    ) -> Result<(), TransportError>;

    /// Replace the deferred placeholder. Last write wins.
    async fn edit_response(&self, token: &str, content: &str) -> Result<(), TransportError>;

    /// Send an additional, separate message tied to the interaction.
    async fn follow_up(&self, token: &str, content: &str) -> Result<(), TransportError>;

    /// Send a plain channel message, unrelated to any interaction.
    async fn send_message(&self, channel_id: ChannelId, content: &str)
        -> Result<(), TransportError>;

    async fn fetch_user(&self, user_id: UserId) -> Result<UserProfile, TransportError>;

    async fn fetch_guild(&self, guild_id: GuildId) -> Result<GuildProfile, TransportError>;

    async fn fetch_channel(&self, channel_id: ChannelId)
        -> Result<ChannelProfile, TransportError>;
}
