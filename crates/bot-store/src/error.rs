//! Store errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Per-user pending reminder cap reached.
    #[error("reminder limit reached for user {0}")]
    ReminderLimit(u64),

    /// Per-channel pending scheduled-message cap reached.
    #[error("schedule limit reached for channel {0}")]
    ScheduleLimit(u64),
}
