//! Background delivery of due reminders and scheduled messages.

use bot_store::BotStore;
use chrono::Utc;
use interactions::Session;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Polls the store and delivers due items through the session's plain
/// channel-message call. Delivery failures are logged and dropped; nothing
/// in this path retries implicitly.
pub struct DeliveryScheduler {
    store: Arc<BotStore>,
    session: Arc<dyn Session>,
    poll_interval: Duration,
}

impl DeliveryScheduler {
    pub fn new(store: Arc<BotStore>, session: Arc<dyn Session>, poll_interval: Duration) -> Self {
        Self {
            store,
            session,
            poll_interval,
        }
    }

    /// Run forever. Intended for `tokio::spawn`.
    pub async fn run(self) {
        loop {
            sleep(self.poll_interval).await;
            self.tick().await;
        }
    }

    /// Deliver everything currently due.
    pub async fn tick(&self) {
        let now = Utc::now();

        for reminder in self.store.take_due_reminders(now).await {
            let content = format!("⏰ Reminder for <@{}>: {}", reminder.user_id, reminder.message);
            match self.session.send_message(reminder.channel_id, &content).await {
                Ok(()) => debug!(reminder = reminder.id, "reminder delivered"),
                Err(e) => warn!(reminder = reminder.id, error = %e, "reminder delivery failed"),
            }
        }

        for scheduled in self.store.take_due_messages(now).await {
            match self
                .session
                .send_message(scheduled.channel_id, &scheduled.content)
                .await
            {
                Ok(()) => debug!(scheduled = scheduled.id, "scheduled message delivered"),
                Err(e) => {
                    warn!(scheduled = scheduled.id, error = %e, "scheduled delivery failed")
                }
            }
        }
    }
}
