//! Reminder command.

use async_trait::async_trait;
use bot_store::{BotStore, StoreError};
use chrono::{Duration, Utc};
use interactions::{
    CommandDefinition, CommandHandler, InteractionEvent, Options, ParameterSpec, Responder,
};
use std::sync::Arc;
use tracing::debug;

/// One week, the longest accepted reminder horizon.
const MAX_MINUTES: i64 = 7 * 24 * 60;

pub struct RemindHandler {
    store: Arc<BotStore>,
}

#[async_trait]
impl CommandHandler for RemindHandler {
    async fn handle(
        &self,
        event: &InteractionEvent,
        responder: &Responder,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        let message = options.string("message")?;
        let minutes = options.integer("minutes")?;
        let remind_at = Utc::now() + Duration::minutes(minutes);

        match self
            .store
            .add_reminder(event.user_id, event.channel_id, &message, remind_at)
            .await
        {
            Ok(reminder) => {
                debug!(reminder = reminder.id, "reminder accepted");
                responder
                    .respond_ephemeral(&format!(
                        "Okay, I'll remind you here in {minutes} minute(s)."
                    ))
                    .await?;
            }
            Err(StoreError::ReminderLimit(_)) => {
                responder
                    .respond_ephemeral(
                        "You have too many pending reminders. Wait for some to fire first.",
                    )
                    .await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

pub fn command(store: Arc<BotStore>) -> CommandDefinition {
    CommandDefinition::new(
        "remind",
        "Set a reminder in this channel",
        super::CATEGORY_UTILITY,
        Arc::new(RemindHandler { store }),
    )
    .option(ParameterSpec::string("message").required())
    .option(ParameterSpec::integer("minutes").required().bounds(1, MAX_MINUTES))
}
