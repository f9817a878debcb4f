//! Stored record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending reminder, delivered to its channel when due.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u64,
    pub user_id: u64,
    pub channel_id: u64,
    pub message: String,
    pub remind_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A message scheduled for later delivery to a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledMessage {
    pub id: u64,
    pub channel_id: u64,
    pub content: String,
    pub send_at: DateTime<Utc>,
    pub created_by: u64,
}

/// Away-from-keyboard marker for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfkStatus {
    pub user_id: u64,
    pub note: Option<String>,
    pub since: DateTime<Utc>,
}

/// A recently deleted message, kept per channel for the snipe surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedMessage {
    pub channel_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub content: String,
    pub deleted_at: DateTime<Utc>,
}
