//! Discord REST API client.

mod client;
mod error;
mod session;
mod types;

pub use client::DiscordClient;
pub use error::DiscordError;
pub use types::*;
