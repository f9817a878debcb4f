//! User info command.

use async_trait::async_trait;
use interactions::{
    CommandDefinition, CommandHandler, InteractionEvent, Options, ParameterSpec, Responder,
    Session,
};
use std::sync::Arc;
use tracing::warn;

pub struct UserInfoHandler {
    session: Arc<dyn Session>,
}

#[async_trait]
impl CommandHandler for UserInfoHandler {
    async fn handle(
        &self,
        event: &InteractionEvent,
        responder: &Responder,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        // No target given means "about me".
        let target = options.user("user")?.unwrap_or(event.user_id);

        responder.defer(false).await?;

        match self.session.fetch_user(target).await {
            Ok(profile) => {
                let display = profile
                    .display_name
                    .clone()
                    .unwrap_or_else(|| profile.username.clone());
                let mut lines = vec![
                    format!("**{display}** (`{}`)", profile.username),
                    format!("id: {}", profile.id),
                ];
                if profile.bot {
                    lines.push("bot account".into());
                }
                if let Some(avatar) = &profile.avatar {
                    lines.push(format!(
                        "https://cdn.discordapp.com/avatars/{}/{avatar}.png",
                        profile.id
                    ));
                }
                responder.edit_response(&lines.join("\n")).await?;
            }
            Err(e) => {
                warn!(user = target, error = %e, "user fetch failed");
                responder.edit_response("Could not fetch that user.").await?;
            }
        }
        Ok(())
    }
}

pub fn command(session: Arc<dyn Session>) -> CommandDefinition {
    CommandDefinition::new(
        "userinfo",
        "Show profile details for a user",
        super::CATEGORY_UTILITY,
        Arc::new(UserInfoHandler { session }),
    )
    .option(ParameterSpec::user("user"))
}
