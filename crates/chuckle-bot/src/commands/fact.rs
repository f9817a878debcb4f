//! Random fact command.

use async_trait::async_trait;
use interactions::{CommandDefinition, CommandHandler, InteractionEvent, Options, Responder};
use providers::FactClient;
use std::sync::Arc;
use tracing::warn;

pub struct FactHandler {
    facts: FactClient,
}

#[async_trait]
impl CommandHandler for FactHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        _options: &Options<'_>,
    ) -> anyhow::Result<()> {
        responder.defer(false).await?;

        match self.facts.random_fact().await {
            Ok(fact) => {
                responder
                    .edit_response(&format!("Did you know? {}", fact.text))
                    .await?;
            }
            Err(e) => {
                warn!(error = %e, "fact fetch failed");
                responder
                    .edit_response("Failed to fetch a fact. Try again later.")
                    .await?;
            }
        }
        Ok(())
    }
}

pub fn command(facts: FactClient) -> CommandDefinition {
    CommandDefinition::new(
        "fact",
        "Share a random useless fact",
        super::CATEGORY_FUN,
        Arc::new(FactHandler { facts }),
    )
}
