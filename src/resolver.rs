use crate::catalog::{Period, Schedule};
use crate::clocktime::{ClockTime, ClockTimeParseError};

/// True iff `now` falls inside the period's closed interval `[start, end]`.
/// Both ends are inclusive, so a period ending at the same minute another
/// begins reports both as active for that minute.
pub fn is_active(period: &Period, now: ClockTime) -> Result<bool, ClockTimeParseError> {
    let start = period.start_time()?;
    let end = period.end_time()?;
    Ok(start <= now && now <= end)
}

/// Every period active at `now`, in the schedule's display order. The input
/// order is not assumed chronological and overlapping periods all match.
pub fn active_periods<'a>(
    schedule: &'a Schedule,
    now: ClockTime,
) -> Result<Vec<&'a Period>, ClockTimeParseError> {
    let mut active = Vec::new();
    for period in &schedule.periods {
        if is_active(period, now)? {
            active.push(period);
        }
    }
    Ok(active)
}

/// The first active period in display order, for single-slot displays.
pub fn current_period<'a>(
    schedule: &'a Schedule,
    now: ClockTime,
) -> Result<Option<&'a Period>, ClockTimeParseError> {
    for period in &schedule.periods {
        if is_active(period, now)? {
            return Ok(Some(period));
        }
    }
    Ok(None)
}
