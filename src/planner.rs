use chrono::{Datelike, NaiveDateTime, TimeDelta, Weekday};

use crate::alerts::AlertSetting;
use crate::catalog::Schedule;
use crate::clocktime::ClockTime;

/// Largest allowed lead time. A lead beyond this would roll the fire date
/// back more than one calendar day, which the settings UI has no way to
/// express; larger values are clamped and logged.
pub const MAX_LEAD_MINUTES: u32 = 1439;

const SCHOOL_WEEK: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// A concrete instruction for the external notification capability: fire at
/// `fire_at` local wall-clock time with the given content. Recomputed fresh
/// on every save and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPlanEntry {
    pub period_key: String,
    pub fire_at: NaiveDateTime,
    pub title: String,
    pub body: String,
}

/// Computes the fire-times for every enabled setting that belongs to
/// `schedule`: one entry per school weekday (Monday through Friday), at the
/// period's start time minus the setting's lead, on the next date on or
/// after `now` with that weekday. Only strictly-future fire-times are
/// emitted; a same-day occurrence whose fire-time already passed is dropped
/// from this planning pass.
///
/// Settings that reference a period no longer present in the schedule are
/// skipped, not errors: schedules may have been edited since the setting was
/// created.
pub fn plan(
    schedule: &Schedule,
    settings: &[AlertSetting],
    now: NaiveDateTime,
) -> Vec<NotificationPlanEntry> {
    let mut entries = Vec::new();

    for setting in settings.iter().filter(|s| s.enabled) {
        if setting.schedule_name() != schedule.name {
            continue;
        }
        let Some(period_name) = setting.period_name() else {
            log::warn!("alert key '{}' has no period component", setting.period_key);
            continue;
        };
        let Some(period) = schedule.period(period_name) else {
            log::debug!(
                "alert '{}' references a period that no longer exists, skipping",
                setting.period_key
            );
            continue;
        };
        let start = match period.start_time() {
            Ok(start) => start,
            Err(err) => {
                log::warn!("unparsable start time for '{}': {err}", setting.period_key);
                continue;
            }
        };

        let lead = clamp_lead(setting);

        for weekday in SCHOOL_WEEK {
            let Some(fire_at) = fire_time(start, lead, weekday, now) else {
                continue;
            };

            entries.push(NotificationPlanEntry {
                period_key: setting.period_key.clone(),
                fire_at,
                title: format!("{} starts soon", period.name),
                body: format!(
                    "Your {} period starts in {} minutes",
                    period.name, lead
                ),
            });
        }
    }

    entries
}

/// The fire-time for one weekday occurrence, or `None` when the occurrence
/// is not strictly in the future. Subtracting the lead from the full start
/// datetime shifts the date back a day whenever the lead crosses midnight,
/// so an alert for a 12:05 AM period fires at 11:55 PM the previous day.
fn fire_time(
    start: ClockTime,
    lead_minutes: u32,
    weekday: Weekday,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let days_to_add =
        (weekday.num_days_from_sunday() + 7 - now.weekday().num_days_from_sunday()) % 7;

    let target_date = now
        .date()
        .checked_add_signed(TimeDelta::days(days_to_add as i64))?;
    let start_at = target_date.and_time(start.as_naive_time());
    let fire_at = start_at.checked_sub_signed(TimeDelta::minutes(lead_minutes as i64))?;

    if fire_at <= now {
        return None;
    }

    Some(fire_at)
}

fn clamp_lead(setting: &AlertSetting) -> u32 {
    if setting.minutes_before > MAX_LEAD_MINUTES {
        log::warn!(
            "lead of {} minutes for '{}' rolls back more than a day, clamping to {}",
            setting.minutes_before,
            setting.period_key,
            MAX_LEAD_MINUTES
        );
        MAX_LEAD_MINUTES
    } else {
        setting.minutes_before
    }
}
