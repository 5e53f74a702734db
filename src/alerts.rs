use serde::{Deserialize, Serialize};

use crate::catalog::Schedule;

/// A user's notification preference for one period, keyed
/// `"<scheduleName>:<periodName>"`. Entries are created lazily when a
/// schedule is first selected and are never auto-deleted, so settings from
/// previously selected schedules accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSetting {
    pub period_key: String,
    pub minutes_before: u32,
    pub enabled: bool,
}

impl AlertSetting {
    pub fn key_for(schedule_name: &str, period_name: &str) -> String {
        format!("{schedule_name}:{period_name}")
    }

    /// The schedule-name component of the key. Period names may not contain
    /// colons, so everything before the first `:` is the schedule.
    pub fn schedule_name(&self) -> &str {
        self.period_key
            .split_once(':')
            .map(|(schedule, _)| schedule)
            .unwrap_or(&self.period_key)
    }

    pub fn period_name(&self) -> Option<&str> {
        self.period_key.split_once(':').map(|(_, period)| period)
    }
}

/// The full, ordered alert-setting list. Serialized as one JSON blob and
/// overwritten wholesale on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertConfig {
    settings: Vec<AlertSetting>,
}

impl AlertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: Vec<AlertSetting>) -> Self {
        Self { settings }
    }

    /// Appends one disabled setting per period of `schedule`. Merge
    /// semantics: keys that already exist keep their current `enabled` and
    /// `minutes_before`, so re-selecting a schedule never resets the user's
    /// choices.
    pub fn defaults_for(&mut self, schedule: &Schedule, default_minutes_before: u32) {
        for period in &schedule.periods {
            let key = AlertSetting::key_for(&schedule.name, &period.name);
            if self.get(&key).is_none() {
                self.settings.push(AlertSetting {
                    period_key: key,
                    minutes_before: default_minutes_before,
                    enabled: false,
                });
            }
        }
    }

    /// Flips `enabled` for the matching entry; silently does nothing when
    /// the key is absent.
    pub fn toggle(&mut self, key: &str) {
        if let Some(setting) = self.get_mut(key) {
            setting.enabled = !setting.enabled;
        }
    }

    /// Sets the minutes-before value, clamped to be non-negative. Callers
    /// are responsible for turning unparsable text input into 0 before
    /// calling.
    pub fn set_minutes(&mut self, key: &str, minutes: i64) {
        if let Some(setting) = self.get_mut(key) {
            setting.minutes_before = minutes.max(0) as u32;
        }
    }

    pub fn get(&self, key: &str) -> Option<&AlertSetting> {
        self.settings.iter().find(|s| s.period_key == key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut AlertSetting> {
        self.settings.iter_mut().find(|s| s.period_key == key)
    }

    pub fn settings(&self) -> &[AlertSetting] {
        &self.settings
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.settings)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        Ok(Self {
            settings: serde_json::from_str(text)?,
        })
    }
}
