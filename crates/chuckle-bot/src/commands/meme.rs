//! Meme command.

use async_trait::async_trait;
use interactions::{CommandDefinition, CommandHandler, InteractionEvent, Options, Responder};
use providers::MemeClient;
use std::sync::Arc;
use tracing::warn;

pub struct MemeHandler {
    memes: MemeClient,
}

#[async_trait]
impl CommandHandler for MemeHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        _options: &Options<'_>,
    ) -> anyhow::Result<()> {
        responder.defer(false).await?;

        match self.memes.random_meme().await {
            Ok(meme) => {
                let content = format!(
                    "**{}**\n{}\n_via r/{} (<{}>)_",
                    meme.title, meme.url, meme.subreddit, meme.post_link
                );
                responder.edit_response(&content).await?;
            }
            Err(e) => {
                warn!(error = %e, "meme fetch failed");
                responder
                    .edit_response("Failed to fetch a meme. Try again later.")
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn command(memes: MemeClient) -> CommandDefinition {
    CommandDefinition::new(
        "meme",
        "Post a random meme",
        super::CATEGORY_FUN,
        Arc::new(MemeHandler { memes }),
    )
}
