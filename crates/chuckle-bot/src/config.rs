//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Discord API configuration
    pub discord: DiscordConfig,

    /// HTTP ingestion server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Third-party data provider configuration
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// In-memory store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Delivery scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    /// Bot token
    pub bot_token: String,

    /// Application id
    pub application_id: u64,

    /// Ed25519 public key (hex) for webhook signature verification
    pub public_key: String,

    /// API root
    #[serde(default = "default_discord_api")]
    pub api_base: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the webhook server
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Shared secret authenticating the gateway relay's /events posts.
    /// When unset, relay events are rejected.
    #[serde(default)]
    pub relay_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_cat_api")]
    pub cat_api: String,

    #[serde(default = "default_meme_api")]
    pub meme_api: String,

    #[serde(default = "default_joke_api")]
    pub joke_api: String,

    #[serde(default = "default_fact_api")]
    pub fact_api: String,

    #[serde(default = "default_trivia_api")]
    pub trivia_api: String,

    /// Per-request timeout for provider calls
    #[serde(default = "default_provider_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Max pending reminders per user
    #[serde(default = "default_max_reminders")]
    pub max_reminders: usize,

    /// Max pending scheduled messages per channel
    #[serde(default = "default_max_scheduled")]
    pub max_scheduled: usize,

    /// Max sniped messages kept per channel
    #[serde(default = "default_max_sniped")]
    pub max_sniped: usize,

    /// How long deleted messages stay snipeable
    #[serde(default = "default_snipe_ttl", with = "humantime_serde")]
    pub snipe_ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Poll interval for due reminders and scheduled messages
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            relay_token: None,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            cat_api: default_cat_api(),
            meme_api: default_meme_api(),
            joke_api: default_joke_api(),
            fact_api: default_fact_api(),
            trivia_api: default_trivia_api(),
            timeout: default_provider_timeout(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_reminders: default_max_reminders(),
            max_scheduled: default_max_scheduled(),
            max_sniped: default_max_sniped(),
            snipe_ttl: default_snipe_ttl(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_discord_api() -> String {
    "https://discord.com/api/v10".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".into()
}

fn default_cat_api() -> String {
    "https://api.thecatapi.com".into()
}

fn default_meme_api() -> String {
    "https://meme-api.com".into()
}

fn default_joke_api() -> String {
    "https://official-joke-api.appspot.com".into()
}

fn default_fact_api() -> String {
    "https://uselessfacts.jsph.pl".into()
}

fn default_trivia_api() -> String {
    "https://opentdb.com".into()
}

fn default_provider_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_reminders() -> usize {
    25
}

fn default_max_scheduled() -> usize {
    25
}

fn default_max_sniped() -> usize {
    20
}

fn default_snipe_ttl() -> Duration {
    Duration::from_secs(60 * 60) // 1 hour
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(15)
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Keep strings as strings; numeric fields are coerced
                    // at deserialization time.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
