//! Joke command.

use async_trait::async_trait;
use interactions::{CommandDefinition, CommandHandler, InteractionEvent, Options, Responder};
use providers::JokeClient;
use std::sync::Arc;
use tracing::warn;

pub struct JokeHandler {
    jokes: JokeClient,
}

#[async_trait]
impl CommandHandler for JokeHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        _options: &Options<'_>,
    ) -> anyhow::Result<()> {
        responder.defer(false).await?;

        match self.jokes.random_joke().await {
            Ok(joke) => {
                responder
                    .edit_response(&format!("{}\n||{}||", joke.setup, joke.punchline))
                    .await?;
            }
            Err(e) => {
                warn!(error = %e, "joke fetch failed");
                responder
                    .edit_response("Failed to fetch a joke. Try again later.")
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn command(jokes: JokeClient) -> CommandDefinition {
    CommandDefinition::new(
        "joke",
        "Tell a random joke, punchline behind a spoiler",
        super::CATEGORY_FUN,
        Arc::new(JokeHandler { jokes }),
    )
}
