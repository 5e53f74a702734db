mod alerts;
mod app;
mod appsettings;
mod calendar;
mod catalog;
mod clocktime;
mod delivery;
mod planner;
mod resolver;
mod storage;
mod worker;

use std::sync::Arc;

use app::App;
use appsettings::AppSettings;
use calendar::SchoolCalendar;
use catalog::ScheduleCatalog;
use delivery::{LogNotificationChannel, NotificationChannel};
use storage::{JsonFilePreferenceStorage, PreferenceStorage};
use worker::TickWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::load()?;
    let catalog = Arc::new(ScheduleCatalog::load_builtin()?);
    let calendar = SchoolCalendar::load_builtin();

    let storage: Arc<dyn PreferenceStorage> =
        Arc::new(JsonFilePreferenceStorage::open(&settings.preferences_path).await?);
    let channel: Arc<dyn NotificationChannel> = Arc::new(LogNotificationChannel::new());

    if !channel.request_permission().await? {
        log::warn!("Notification permission denied; alerts will not be delivered");
    }

    let app = App::load(
        Arc::clone(&storage),
        Arc::clone(&channel),
        Arc::clone(&catalog),
        &settings,
    )
    .await?;

    let today = chrono::Local::now().date_naive();
    for event in calendar.events_on(today) {
        log::info!("Today: {}", event.name);
    }
    if !calendar.is_school_day(today) {
        log::info!("No school today");
    }
    if let Some(next) = calendar.next_event_after(today) {
        log::info!("Next on the calendar: {} on {}", next.name, next.date);
    }

    // Re-schedule the saved alerts so the pending notifications match the
    // persisted settings after a restart.
    let scheduled = app.save_alerts().await?;
    log::info!("Scheduled {scheduled} notifications");

    let worker = match app.state().preferred_schedule.as_deref() {
        Some(name) => {
            let schedule = catalog
                .get(name)
                .expect("Loaded state only keeps schedules that exist in the catalog.")
                .clone();
            log::info!("Tracking schedule '{name}'");
            Some(TickWorker::spawn(Arc::new(schedule)))
        }
        None => {
            log::info!(
                "No preferred schedule selected yet; available: {}",
                catalog
                    .schedules()
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            None
        }
    };

    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down");

    if let Some(worker) = worker {
        worker.shutdown().await;
    }

    Ok(())
}
