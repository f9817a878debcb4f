//! In-memory bot state with TTL expiration for sniped messages.

use crate::error::StoreError;
use crate::types::*;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

struct Inner {
    reminders: Vec<Reminder>,
    scheduled: Vec<ScheduledMessage>,
    afk: HashMap<u64, AfkStatus>,
    /// Most recent first, bounded per channel.
    deleted: HashMap<u64, VecDeque<DeletedMessage>>,
}

/// In-memory store for reminders, scheduled messages, AFK state and
/// deleted-message history.
///
/// Keyed by user or channel identifiers; read-heavy maps sit behind an
/// `RwLock`. Deleted messages expire after the configured TTL via a
/// background cleanup task.
#[derive(Clone)]
pub struct BotStore {
    inner: Arc<RwLock<Inner>>,
    next_id: Arc<AtomicU64>,
    max_reminders_per_user: usize,
    max_scheduled_per_channel: usize,
    max_deleted_per_channel: usize,
    deleted_ttl: Duration,
}

impl BotStore {
    /// Create a new store and spawn its cleanup task.
    pub fn new(
        max_reminders_per_user: usize,
        max_scheduled_per_channel: usize,
        max_deleted_per_channel: usize,
        deleted_ttl: Duration,
    ) -> Self {
        let store = Self {
            inner: Arc::new(RwLock::new(Inner {
                reminders: Vec::new(),
                scheduled: Vec::new(),
                afk: HashMap::new(),
                deleted: HashMap::new(),
            })),
            next_id: Arc::new(AtomicU64::new(1)),
            max_reminders_per_user,
            max_scheduled_per_channel,
            max_deleted_per_channel,
            deleted_ttl,
        };

        let cleanup_store = store.clone();
        tokio::spawn(async move {
            cleanup_store.cleanup_loop().await;
        });

        info!(
            "bot store initialized (max_reminders={}, max_deleted={}, deleted_ttl={:?})",
            max_reminders_per_user, max_deleted_per_channel, deleted_ttl
        );

        store
    }

    async fn cleanup_loop(&self) {
        let cleanup_interval = Duration::from_secs(60);

        loop {
            tokio::time::sleep(cleanup_interval).await;

            let cutoff = Utc::now()
                - ChronoDuration::from_std(self.deleted_ttl)
                    .unwrap_or_else(|_| ChronoDuration::hours(1));
            let mut inner = self.inner.write().await;
            let mut removed = 0usize;
            for queue in inner.deleted.values_mut() {
                let before = queue.len();
                queue.retain(|d| d.deleted_at > cutoff);
                removed += before - queue.len();
            }
            inner.deleted.retain(|_, queue| !queue.is_empty());

            if removed > 0 {
                debug!("expired {} sniped messages", removed);
            }
        }
    }

    /// Store a new reminder for a user.
    #[instrument(skip(self, message))]
    pub async fn add_reminder(
        &self,
        user_id: u64,
        channel_id: u64,
        message: &str,
        remind_at: DateTime<Utc>,
    ) -> Result<Reminder, StoreError> {
        let mut inner = self.inner.write().await;

        let pending = inner.reminders.iter().filter(|r| r.user_id == user_id).count();
        if pending >= self.max_reminders_per_user {
            return Err(StoreError::ReminderLimit(user_id));
        }

        let reminder = Reminder {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            channel_id,
            message: message.to_string(),
            remind_at,
            created_at: Utc::now(),
        };
        inner.reminders.push(reminder.clone());
        debug!(user = user_id, at = %remind_at, "reminder stored");
        Ok(reminder)
    }

    /// Remove and return all reminders due at `now`.
    #[instrument(skip(self))]
    pub async fn take_due_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut inner = self.inner.write().await;
        let (due, pending): (Vec<_>, Vec<_>) = inner
            .reminders
            .drain(..)
            .partition(|r| r.remind_at <= now);
        inner.reminders = pending;
        due
    }

    /// Number of pending reminders for a user.
    pub async fn reminder_count(&self, user_id: u64) -> usize {
        let inner = self.inner.read().await;
        inner.reminders.iter().filter(|r| r.user_id == user_id).count()
    }

    /// Store a message for later delivery.
    #[instrument(skip(self, content))]
    pub async fn schedule_message(
        &self,
        channel_id: u64,
        created_by: u64,
        content: &str,
        send_at: DateTime<Utc>,
    ) -> Result<ScheduledMessage, StoreError> {
        let mut inner = self.inner.write().await;

        let pending = inner
            .scheduled
            .iter()
            .filter(|m| m.channel_id == channel_id)
            .count();
        if pending >= self.max_scheduled_per_channel {
            return Err(StoreError::ScheduleLimit(channel_id));
        }

        let scheduled = ScheduledMessage {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            channel_id,
            content: content.to_string(),
            send_at,
            created_by,
        };
        inner.scheduled.push(scheduled.clone());
        debug!(channel = channel_id, at = %send_at, "message scheduled");
        Ok(scheduled)
    }

    /// Remove and return all scheduled messages due at `now`.
    #[instrument(skip(self))]
    pub async fn take_due_messages(&self, now: DateTime<Utc>) -> Vec<ScheduledMessage> {
        let mut inner = self.inner.write().await;
        let (due, pending): (Vec<_>, Vec<_>) =
            inner.scheduled.drain(..).partition(|m| m.send_at <= now);
        inner.scheduled = pending;
        due
    }

    /// Mark a user as away.
    #[instrument(skip(self, note))]
    pub async fn set_afk(&self, user_id: u64, note: Option<String>) -> AfkStatus {
        let status = AfkStatus {
            user_id,
            note,
            since: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.afk.insert(user_id, status.clone());
        status
    }

    /// Clear a user's away marker. Returns the previous status if any.
    #[instrument(skip(self))]
    pub async fn clear_afk(&self, user_id: u64) -> Option<AfkStatus> {
        let mut inner = self.inner.write().await;
        inner.afk.remove(&user_id)
    }

    pub async fn get_afk(&self, user_id: u64) -> Option<AfkStatus> {
        let inner = self.inner.read().await;
        inner.afk.get(&user_id).cloned()
    }

    /// Record a deleted message for the channel's snipe history.
    #[instrument(skip(self, record))]
    pub async fn record_deleted(&self, record: DeletedMessage) {
        let mut inner = self.inner.write().await;
        let queue = inner.deleted.entry(record.channel_id).or_default();
        queue.push_front(record);
        queue.truncate(self.max_deleted_per_channel);
    }

    /// Most recently deleted message in a channel, if one is still retained.
    pub async fn last_deleted(&self, channel_id: u64) -> Option<DeletedMessage> {
        let cutoff = Utc::now()
            - ChronoDuration::from_std(self.deleted_ttl)
                .unwrap_or_else(|_| ChronoDuration::hours(1));
        let inner = self.inner.read().await;
        inner
            .deleted
            .get(&channel_id)
            .and_then(|queue| queue.front())
            .filter(|d| d.deleted_at > cutoff)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> BotStore {
        BotStore::new(3, 3, 2, Duration::from_secs(3600))
    }

    fn deleted(channel_id: u64, content: &str) -> DeletedMessage {
        DeletedMessage {
            channel_id,
            author_id: 10,
            author_name: "alice".into(),
            content: content.into(),
            deleted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_and_take_due_reminders() {
        let store = store();
        let now = Utc::now();

        store
            .add_reminder(1, 100, "past", now - ChronoDuration::minutes(1))
            .await
            .unwrap();
        store
            .add_reminder(1, 100, "future", now + ChronoDuration::minutes(5))
            .await
            .unwrap();

        let due = store.take_due_reminders(now).await;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].message, "past");

        // The future reminder stays pending and is not re-delivered.
        assert!(store.take_due_reminders(now).await.is_empty());
        assert_eq!(store.reminder_count(1).await, 1);
    }

    #[tokio::test]
    async fn test_reminder_limit_enforced() {
        let store = store();
        let at = Utc::now() + ChronoDuration::minutes(5);

        for i in 0..3 {
            store
                .add_reminder(1, 100, &format!("r{i}"), at)
                .await
                .unwrap();
        }

        let err = store.add_reminder(1, 100, "overflow", at).await.unwrap_err();
        assert!(matches!(err, StoreError::ReminderLimit(1)));

        // Other users are unaffected.
        store.add_reminder(2, 100, "ok", at).await.unwrap();
    }

    #[tokio::test]
    async fn test_scheduled_messages_due_drain() {
        let store = store();
        let now = Utc::now();

        store
            .schedule_message(100, 1, "soon", now - ChronoDuration::seconds(1))
            .await
            .unwrap();
        store
            .schedule_message(100, 1, "later", now + ChronoDuration::hours(1))
            .await
            .unwrap();

        let due = store.take_due_messages(now).await;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].content, "soon");
    }

    #[tokio::test]
    async fn test_afk_set_get_clear() {
        let store = store();

        assert!(store.get_afk(1).await.is_none());

        store.set_afk(1, Some("lunch".into())).await;
        let afk = store.get_afk(1).await.unwrap();
        assert_eq!(afk.note.as_deref(), Some("lunch"));

        let cleared = store.clear_afk(1).await.unwrap();
        assert_eq!(cleared.user_id, 1);
        assert!(store.get_afk(1).await.is_none());
        assert!(store.clear_afk(1).await.is_none());
    }

    #[tokio::test]
    async fn test_deleted_history_bounded_most_recent_first() {
        let store = store();

        store.record_deleted(deleted(100, "first")).await;
        store.record_deleted(deleted(100, "second")).await;
        store.record_deleted(deleted(100, "third")).await;

        // Cap is 2: the oldest entry fell off, newest is sniped first.
        let last = store.last_deleted(100).await.unwrap();
        assert_eq!(last.content, "third");

        assert!(store.last_deleted(999).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_deleted_message_not_sniped() {
        let store = BotStore::new(3, 3, 2, Duration::from_millis(10));

        let mut record = deleted(100, "old");
        record.deleted_at = Utc::now() - ChronoDuration::seconds(5);
        store.record_deleted(record).await;

        assert!(store.last_deleted(100).await.is_none());
    }
}
