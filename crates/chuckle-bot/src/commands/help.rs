//! Help command: lists the command catalogue by category.

use async_trait::async_trait;
use interactions::{
    CommandDefinition, CommandHandler, CommandRegistry, InteractionEvent, Options, Responder,
};
use std::sync::Arc;

pub struct HelpHandler {
    text: String,
}

/// Render the help text from the registry's category grouping. Called after
/// all feature commands are registered, so the help command itself appends
/// its own line.
pub fn render(registry: &CommandRegistry) -> String {
    let mut out = String::from("**Available commands**\n");
    for (category, commands) in registry.by_category() {
        out.push_str(&format!("\n__{category}__\n"));
        for definition in commands {
            out.push_str(&format!("`/{}` - {}\n", definition.name, definition.description));
        }
    }
    out.push_str("`/help` - Show this message\n");
    out
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(
        &self,
        _event: &InteractionEvent,
        responder: &Responder,
        _options: &Options<'_>,
    ) -> anyhow::Result<()> {
        responder.respond_ephemeral(&self.text).await?;
        Ok(())
    }
}

pub fn command(text: String) -> CommandDefinition {
    CommandDefinition::new(
        "help",
        "Show this message",
        super::CATEGORY_GENERAL,
        Arc::new(HelpHandler { text }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_groups_by_category() {
        let mut registry = CommandRegistry::new();
        registry.register(crate::commands::ping::command()).unwrap();
        registry.register(crate::commands::calc::command()).unwrap();

        let text = render(&registry);
        assert!(text.contains("__general__"));
        assert!(text.contains("__utility__"));
        assert!(text.contains("`/ping` - Check that the bot is alive"));
        assert!(text.contains("`/help` - Show this message"));
        // general was registered first and stays first.
        assert!(text.find("__general__").unwrap() < text.find("__utility__").unwrap());
    }
}
