use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::alerts::AlertConfig;
use crate::appsettings::AppSettings;
use crate::catalog::ScheduleCatalog;
use crate::delivery::NotificationChannel;
use crate::planner;
use crate::storage::{PreferenceStorage, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// The user-visible state: preferred schedule, theme, default lead time and
/// the alert-setting list. One owner, loaded at startup and written back on
/// the explicit save/change operations below; no ambient globals.
#[derive(Debug, Clone)]
pub struct AppState {
    pub preferred_schedule: Option<String>,
    pub theme: Theme,
    pub default_minutes_before: u32,
    pub alerts: AlertConfig,
}

pub struct App {
    storage: Arc<dyn PreferenceStorage>,
    channel: Arc<dyn NotificationChannel>,
    catalog: Arc<ScheduleCatalog>,
    state: AppState,
}

impl App {
    /// Loads the persisted state. Unreadable individual values fall back to
    /// defaults with a warning rather than failing startup; only storage
    /// access itself is an error.
    pub async fn load(
        storage: Arc<dyn PreferenceStorage>,
        channel: Arc<dyn NotificationChannel>,
        catalog: Arc<ScheduleCatalog>,
        settings: &AppSettings,
    ) -> anyhow::Result<Self> {
        let preferred_schedule = storage
            .get(keys::PREFERRED_SCHEDULE)
            .await?
            .filter(|name| {
                let known = catalog.get(name).is_some();
                if !known {
                    log::warn!("preferred schedule '{name}' is not in the catalog, ignoring");
                }
                known
            });

        let theme = match storage.get(keys::THEME).await? {
            Some(text) => text.parse().unwrap_or_else(|err| {
                log::warn!("{err}, falling back to system theme");
                Theme::System
            }),
            None => Theme::System,
        };

        let default_minutes_before = match storage.get(keys::DEFAULT_MINUTES_BEFORE).await? {
            Some(text) => text.parse().unwrap_or_else(|_| {
                log::warn!("stored default lead '{text}' is not a number, using configured value");
                settings.default_minutes_before
            }),
            None => settings.default_minutes_before,
        };

        let mut alerts = match storage.get(keys::ALERT_SETTINGS).await? {
            Some(blob) => AlertConfig::from_json(&blob).unwrap_or_else(|err| {
                log::warn!("stored alert settings are unreadable ({err}), starting fresh");
                AlertConfig::new()
            }),
            None => AlertConfig::new(),
        };

        // Re-merge defaults so periods added to the catalog since the last
        // run get an entry; existing entries win.
        if let Some(schedule) = preferred_schedule.as_deref().and_then(|n| catalog.get(n)) {
            alerts.defaults_for(schedule, default_minutes_before);
        }

        Ok(Self {
            storage,
            channel,
            catalog,
            state: AppState {
                preferred_schedule,
                theme,
                default_minutes_before,
                alerts,
            },
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Makes `name` the preferred schedule, lazily creating disabled alert
    /// settings for its periods, and persists the choice.
    pub async fn select_schedule(&mut self, name: &str) -> anyhow::Result<()> {
        let Some(schedule) = self.catalog.get(name) else {
            anyhow::bail!("no schedule named '{name}'");
        };

        self.state
            .alerts
            .defaults_for(schedule, self.state.default_minutes_before);
        self.state.preferred_schedule = Some(name.to_string());
        self.storage.set(keys::PREFERRED_SCHEDULE, name).await?;

        Ok(())
    }

    pub async fn set_theme(&mut self, theme: Theme) -> anyhow::Result<()> {
        self.state.theme = theme;
        self.storage.set(keys::THEME, theme.as_str()).await?;
        Ok(())
    }

    pub async fn set_default_minutes_before(&mut self, minutes: u32) -> anyhow::Result<()> {
        self.state.default_minutes_before = minutes;
        self.storage
            .set(keys::DEFAULT_MINUTES_BEFORE, &minutes.to_string())
            .await?;
        Ok(())
    }

    /// In-memory mutation; persisted by the next [`App::save_alerts`].
    pub fn toggle_alert(&mut self, key: &str) {
        self.state.alerts.toggle(key);
    }

    /// In-memory mutation; persisted by the next [`App::save_alerts`].
    pub fn set_alert_minutes(&mut self, key: &str, minutes: i64) {
        self.state.alerts.set_minutes(key, minutes);
    }

    /// The explicit save: persists the full alert list, drops every pending
    /// notification, then schedules the freshly computed plan. Returns how
    /// many notifications were scheduled. A persistence failure aborts
    /// before anything is cancelled and leaves the in-memory state intact.
    pub async fn save_alerts(&self) -> anyhow::Result<usize> {
        self.save_alerts_at(chrono::Local::now().naive_local())
            .await
    }

    pub async fn save_alerts_at(&self, now: NaiveDateTime) -> anyhow::Result<usize> {
        let blob = self.state.alerts.to_json()?;
        self.storage.set(keys::ALERT_SETTINGS, &blob).await?;

        self.channel.cancel_all().await?;

        let Some(schedule) = self
            .state
            .preferred_schedule
            .as_deref()
            .and_then(|n| self.catalog.get(n))
        else {
            return Ok(0);
        };

        let entries = planner::plan(schedule, self.state.alerts.settings(), now);
        for entry in &entries {
            self.channel.schedule_at(entry).await?;
        }

        Ok(entries.len())
    }
}
