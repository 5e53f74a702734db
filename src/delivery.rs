use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::planner::NotificationPlanEntry;

pub type NotificationId = u64;

/// The external notification-delivery capability. The core only computes
/// when a notification should fire and what it should contain; scheduling,
/// display and permission prompting belong to the implementation behind this
/// trait.
#[async_trait]
pub trait NotificationChannel: Send + Sync + 'static {
    async fn request_permission(&self) -> anyhow::Result<bool>;

    /// Drops every pending notification. Called once per save, before the
    /// fresh plan is scheduled.
    async fn cancel_all(&self) -> anyhow::Result<()>;

    async fn schedule_at(&self, entry: &NotificationPlanEntry) -> anyhow::Result<NotificationId>;
}

/// Stand-in delivery channel for the headless daemon: accepts everything and
/// logs what a platform notifier would schedule.
pub struct LogNotificationChannel {
    next_id: AtomicU64,
}

impl LogNotificationChannel {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for LogNotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationChannel for LogNotificationChannel {
    async fn request_permission(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn cancel_all(&self) -> anyhow::Result<()> {
        log::info!("Cancelling all pending notifications");
        Ok(())
    }

    async fn schedule_at(&self, entry: &NotificationPlanEntry) -> anyhow::Result<NotificationId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::info!(
            "Scheduled notification {id} at {}: {} / {}",
            entry.fire_at,
            entry.title,
            entry.body
        );
        Ok(id)
    }
}

#[cfg(test)]
pub mod test_utils {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ChannelCall {
        CancelAll,
        ScheduleAt(NotificationPlanEntry),
    }

    pub type RecordedCalls = Arc<Mutex<Vec<ChannelCall>>>;

    /// Records the order of boundary calls so tests can assert the
    /// cancel-all-then-schedule contract.
    pub struct RecordingChannel {
        pub calls: RecordedCalls,
        pub permission: bool,
    }

    impl RecordingChannel {
        pub fn new(calls: &RecordedCalls) -> Self {
            Self {
                calls: Arc::clone(calls),
                permission: true,
            }
        }
    }

    #[async_trait]
    impl NotificationChannel for RecordingChannel {
        async fn request_permission(&self) -> anyhow::Result<bool> {
            Ok(self.permission)
        }

        async fn cancel_all(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(ChannelCall::CancelAll);
            Ok(())
        }

        async fn schedule_at(
            &self,
            entry: &NotificationPlanEntry,
        ) -> anyhow::Result<NotificationId> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(ChannelCall::ScheduleAt(entry.clone()));
            Ok(calls.len() as NotificationId)
        }
    }
}
