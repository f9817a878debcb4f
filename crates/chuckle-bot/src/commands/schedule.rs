//! Scheduled message command.

use async_trait::async_trait;
use bot_store::{BotStore, StoreError};
use chrono::{Duration, Utc};
use interactions::{
    CommandDefinition, CommandHandler, InteractionEvent, Options, ParameterSpec, Responder,
};
use std::sync::Arc;

const MAX_MINUTES: i64 = 7 * 24 * 60;

pub struct ScheduleHandler {
    store: Arc<BotStore>,
}

#[async_trait]
impl CommandHandler for ScheduleHandler {
    async fn handle(
        &self,
        event: &InteractionEvent,
        responder: &Responder,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        let channel_id = options.channel("channel")?.unwrap_or(event.channel_id);
        let message = options.string("message")?;
        let minutes = options.integer("minutes")?;
        let send_at = Utc::now() + Duration::minutes(minutes);

        match self
            .store
            .schedule_message(channel_id, event.user_id, &message, send_at)
            .await
        {
            Ok(_) => {
                responder
                    .respond_ephemeral(&format!(
                        "Scheduled for <#{channel_id}> in {minutes} minute(s)."
                    ))
                    .await?;
            }
            Err(StoreError::ScheduleLimit(_)) => {
                responder
                    .respond_ephemeral("That channel already has too many scheduled messages.")
                    .await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

pub fn command(store: Arc<BotStore>) -> CommandDefinition {
    CommandDefinition::new(
        "schedule",
        "Schedule a message for later delivery",
        super::CATEGORY_UTILITY,
        Arc::new(ScheduleHandler { store }),
    )
    .option(ParameterSpec::channel("channel").required())
    .option(ParameterSpec::string("message").required())
    .option(ParameterSpec::integer("minutes").required().bounds(1, MAX_MINUTES))
}
