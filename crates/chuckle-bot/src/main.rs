//! Chuckle Discord bot - main entry point.

use anyhow::Context;
use bot_store::BotStore;
use chuckle_bot::commands;
use chuckle_bot::config::Config;
use chuckle_bot::error::AppResult;
use chuckle_bot::ingest::{self, AppState};
use chuckle_bot::scheduler::DeliveryScheduler;
use discord_client::DiscordClient;
use interactions::{CommandRegistry, Dispatcher, Session};
use providers::{CatClient, FactClient, JokeClient, MemeClient, TriviaClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting chuckle bot...");

    // Platform client
    let discord = Arc::new(DiscordClient::new(
        &config.discord.bot_token,
        config.discord.application_id,
        &config.discord.api_base,
        config.discord.timeout,
    )?);
    let session: Arc<dyn Session> = discord.clone();

    let verify_key = ingest::parse_public_key(&config.discord.public_key)
        .context("Failed to parse Discord public key")?;

    // Data provider clients
    let timeout = config.providers.timeout;
    let cats = CatClient::new(&config.providers.cat_api, timeout)?;
    let memes = MemeClient::new(&config.providers.meme_api, timeout)?;
    let jokes = JokeClient::new(&config.providers.joke_api, timeout)?;
    let facts = FactClient::new(&config.providers.fact_api, timeout)?;
    let trivia = TriviaClient::new(&config.providers.trivia_api, timeout)?;

    // Feature store
    let store = Arc::new(BotStore::new(
        config.store.max_reminders,
        config.store.max_scheduled,
        config.store.max_sniped,
        config.store.snipe_ttl,
    ));

    // Command catalogue. Any registration error aborts startup.
    let mut registry = CommandRegistry::new();
    registry.register(commands::ping::command())?;
    registry.register(commands::cat::command(cats))?;
    registry.register(commands::meme::command(memes))?;
    registry.register(commands::joke::command(jokes))?;
    registry.register(commands::fact::command(facts))?;
    registry.register(commands::trivia::command(trivia))?;
    registry.register(commands::calc::command())?;
    registry.register(commands::remind::command(store.clone()))?;
    registry.register(commands::schedule::command(store.clone()))?;
    registry.register(commands::afk::command(store.clone()))?;
    registry.register(commands::snipe::command(store.clone()))?;
    registry.register(commands::userinfo::command(session.clone()))?;
    let help_text = commands::help::render(&registry);
    registry.register(commands::help::command(help_text))?;
    info!("Registered {} commands", registry.len());

    let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry), session.clone()));

    // Health check
    if discord.health_check().await {
        info!("Discord API reachable at {}", config.discord.api_base);
    } else {
        warn!("Discord API health check failed - will retry on requests");
    }

    // Background delivery of reminders and scheduled messages
    let scheduler = DeliveryScheduler::new(
        store.clone(),
        session.clone(),
        config.scheduler.poll_interval,
    );
    tokio::spawn(scheduler.run());

    // Webhook server
    let app = ingest::router(AppState {
        dispatcher: dispatcher.clone(),
        store: store.clone(),
        verify_key,
        relay_token: config.server.relay_token.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_addr))?;
    info!("Listening for interactions on {}", config.server.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop accepting events, let in-flight handlers finish naturally.
    dispatcher.close();
    while dispatcher.in_flight() > 0 {
        info!("Waiting for {} in-flight interactions...", dispatcher.in_flight());
        sleep(Duration::from_millis(250)).await;
    }

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
