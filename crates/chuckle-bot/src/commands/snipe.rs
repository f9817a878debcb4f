//! Snipe command: resurface the channel's last deleted message.

use async_trait::async_trait;
use bot_store::BotStore;
use chrono::Utc;
use interactions::{CommandDefinition, CommandHandler, InteractionEvent, Options, Responder};
use std::sync::Arc;

pub struct SnipeHandler {
    store: Arc<BotStore>,
}

#[async_trait]
impl CommandHandler for SnipeHandler {
    async fn handle(
        &self,
        event: &InteractionEvent,
        responder: &Responder,
        _options: &Options<'_>,
    ) -> anyhow::Result<()> {
        match self.store.last_deleted(event.channel_id).await {
            Some(deleted) => {
                let seconds = Utc::now()
                    .signed_duration_since(deleted.deleted_at)
                    .num_seconds()
                    .max(0);
                responder
                    .respond(&format!(
                        "**{}** said: {}\n_deleted {seconds}s ago_",
                        deleted.author_name, deleted.content
                    ))
                    .await?;
            }
            None => {
                responder
                    .respond_ephemeral("Nothing to snipe in this channel.")
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn command(store: Arc<BotStore>) -> CommandDefinition {
    CommandDefinition::new(
        "snipe",
        "Show the most recently deleted message in this channel",
        super::CATEGORY_UTILITY,
        Arc::new(SnipeHandler { store }),
    )
}
