//! Ping command.

use async_trait::async_trait;
use interactions::{CommandDefinition, CommandHandler, InteractionEvent, Options, Responder};
use std::sync::Arc;

pub struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        _options: &Options<'_>,
    ) -> anyhow::Result<()> {
        responder.respond("Pong!").await?;
        Ok(())
    }
}

pub fn command() -> CommandDefinition {
    CommandDefinition::new(
        "ping",
        "Check that the bot is alive",
        super::CATEGORY_GENERAL,
        Arc::new(PingHandler),
    )
}
