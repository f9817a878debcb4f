//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Discord error: {0}")]
    Discord(#[from] discord_client::DiscordError),

    #[error("Registry error: {0}")]
    Registry(#[from] interactions::RegistryError),

    #[error("Provider error: {0}")]
    Provider(#[from] providers::ProviderError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
