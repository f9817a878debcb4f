//! AFK status command.

use async_trait::async_trait;
use bot_store::BotStore;
use interactions::{
    CommandDefinition, CommandHandler, InteractionEvent, Options, ParameterSpec, Responder,
};
use std::sync::Arc;

pub struct AfkHandler {
    store: Arc<BotStore>,
}

#[async_trait]
impl CommandHandler for AfkHandler {
    async fn handle(
        &self,
        event: &InteractionEvent,
        responder: &Responder,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        // Toggle: a second /afk clears the marker.
        if self.store.clear_afk(event.user_id).await.is_some() {
            responder
                .respond("Welcome back! Your AFK status is cleared.")
                .await?;
            return Ok(());
        }

        let note = options.string("note")?;
        let note = {
            let trimmed = note.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        self.store.set_afk(event.user_id, note.clone()).await;

        let text = match note {
            Some(note) => format!("<@{}> is now AFK: {note}", event.user_id),
            None => format!("<@{}> is now AFK.", event.user_id),
        };
        responder.respond(&text).await?;
        Ok(())
    }
}

pub fn command(store: Arc<BotStore>) -> CommandDefinition {
    CommandDefinition::new(
        "afk",
        "Toggle your away status, with an optional note",
        super::CATEGORY_UTILITY,
        Arc::new(AfkHandler { store }),
    )
    .option(ParameterSpec::string("note"))
}
