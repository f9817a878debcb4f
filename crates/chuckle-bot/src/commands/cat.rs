//! Cat picture command.

use async_trait::async_trait;
use interactions::{CommandDefinition, CommandHandler, InteractionEvent, Options, Responder};
use providers::CatClient;
use std::sync::Arc;
use tracing::warn;

pub struct CatHandler {
    cats: CatClient,
}

#[async_trait]
impl CommandHandler for CatHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        _options: &Options<'_>,
    ) -> anyhow::Result<()> {
        // Provider latency can exceed the acknowledgment window.
        responder.defer(false).await?;

        match self.cats.random_image().await {
            Ok(image) => responder.edit_response(&image.url).await?,
            Err(e) => {
                warn!(error = %e, "cat image fetch failed");
                responder
                    .edit_response("Failed to fetch a cat picture. Try again later.")
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn command(cats: CatClient) -> CommandDefinition {
    CommandDefinition::new(
        "cat",
        "Post a random cat picture",
        super::CATEGORY_FUN,
        Arc::new(CatHandler { cats }),
    )
}
