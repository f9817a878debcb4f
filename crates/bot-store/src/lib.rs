//! In-memory persistence for bot features.
//!
//! Reminders, scheduled messages, AFK markers and deleted-message history,
//! keyed by user or channel ids. Everything lives in process memory; sniped
//! messages expire on a TTL.

mod error;
mod store;
mod types;

pub use error::StoreError;
pub use store::BotStore;
pub use types::*;
