//! Common test utilities for integration tests.

use discord_client::DiscordClient;
use interactions::{CommandRegistry, Dispatcher, InteractionEvent, OptionValue, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Application id used by all test clients.
pub const APP_ID: u64 = 4242;

/// Start a mock Discord API server.
pub async fn mock_discord_server() -> MockServer {
    MockServer::start().await
}

/// Create a Discord client pointed at a mock server.
pub fn test_discord_client(mock_server: &MockServer) -> DiscordClient {
    DiscordClient::new(
        "test-token",
        APP_ID,
        mock_server.uri(),
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Build a dispatcher over a registry and a mock-backed client.
pub fn test_dispatcher(registry: CommandRegistry, client: &DiscordClient) -> Dispatcher {
    let session: Arc<dyn Session> = Arc::new(client.clone());
    Dispatcher::new(Arc::new(registry), session)
}

/// A slash-command event as the ingestion layer would produce it.
pub fn slash_event(command: &str, arguments: HashMap<String, OptionValue>) -> InteractionEvent {
    InteractionEvent {
        id: 7,
        token: "tok".into(),
        command: command.into(),
        arguments,
        user_id: 1,
        guild_id: Some(2),
        channel_id: 100,
    }
}
