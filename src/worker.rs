use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::catalog::Schedule;
use crate::clocktime::ClockTime;
use crate::resolver;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The once-per-second clock tick that re-resolves the active period for the
/// displayed schedule. Owns its task for the lifetime of the display and is
/// torn down through the cancellation token.
pub struct TickWorker {
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    current: watch::Receiver<Option<String>>,
}

impl TickWorker {
    pub fn spawn(schedule: Arc<Schedule>) -> Self {
        let cancellation_token = CancellationToken::new();
        let task_token = cancellation_token.child_token();
        let (tx, rx) = watch::channel(None);

        let task = tokio::spawn(async move {
            run_ticks(schedule, tx, task_token).await;
        });

        Self {
            task,
            cancellation_token,
            current: rx,
        }
    }

    /// Name of the currently active period, as of the last tick.
    pub fn current_period(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    pub async fn shutdown(self) {
        self.cancellation_token.cancel();
        let _ = self.task.await;
    }
}

async fn run_ticks(
    schedule: Arc<Schedule>,
    tx: watch::Sender<Option<String>>,
    cancellation_token: CancellationToken,
) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                log::info!("Clock tick for '{}' shutting down", schedule.name);
                break;
            }
            _ = interval.tick() => {
                let now = chrono::Local::now().naive_local();
                let current = resolve_current(&schedule, now);
                publish_if_changed(&schedule, &tx, current);
            }
        }
    }
}

/// The active period name at `now`. Seconds are discarded so the result only
/// changes on minute boundaries; a malformed catalog entry resolves as
/// never-active here since the tick loop has nobody to surface errors to.
pub fn resolve_current(schedule: &Schedule, now: NaiveDateTime) -> Option<String> {
    let minute = ClockTime::from_hm(now.hour() as u8, now.minute() as u8)?;

    match resolver::current_period(schedule, minute) {
        Ok(period) => period.map(|p| p.name.clone()),
        Err(err) => {
            log::warn!("cannot resolve active period for '{}': {err}", schedule.name);
            None
        }
    }
}

fn publish_if_changed(
    schedule: &Schedule,
    tx: &watch::Sender<Option<String>>,
    current: Option<String>,
) {
    let changed = *tx.borrow() != current;
    if !changed {
        return;
    }

    match &current {
        Some(name) => log::info!("'{}': {} is now in session", schedule.name, name),
        None => log::info!("'{}': no period in session", schedule.name),
    }
    let _ = tx.send(current);
}
