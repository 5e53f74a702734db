use thiserror::Error;

use crate::clocktime::{ClockTime, ClockTimeParseError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("schedule '{schedule}' has no periods")]
    EmptySchedule { schedule: String },

    #[error("period '{period}' in schedule '{schedule}' has an unparsable time")]
    BadPeriodTime {
        schedule: String,
        period: String,
        #[source]
        source: ClockTimeParseError,
    },

    #[error("period '{period}' in schedule '{schedule}' ends before it starts")]
    InvertedPeriod { schedule: String, period: String },
}

/// A named timeslot within a schedule. `start`/`end` are kept in the
/// catalog's textual 12-hour form; `duration_minutes` is display data carried
/// verbatim from the source and is not cross-checked against `end - start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub name: String,
    pub start: String,
    pub end: String,
    pub duration_minutes: u32,
}

impl Period {
    pub fn start_time(&self) -> Result<ClockTime, ClockTimeParseError> {
        self.start.parse()
    }

    pub fn end_time(&self) -> Result<ClockTime, ClockTimeParseError> {
        self.end.parse()
    }
}

/// One day-type's bell pattern. Periods are kept in display order, which is
/// not necessarily chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub name: String,
    pub periods: Vec<Period>,
}

impl Schedule {
    pub fn period(&self, name: &str) -> Option<&Period> {
        self.periods.iter().find(|p| p.name == name)
    }
}

/// The full set of named schedules, validated once at load and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct ScheduleCatalog {
    schedules: Vec<Schedule>,
}

impl ScheduleCatalog {
    pub fn load_builtin() -> Result<Self, CatalogError> {
        Self::from_schedules(builtin_schedules())
    }

    /// Validates every period: both times must parse and a period must not
    /// end before it starts. Overlap between periods is allowed; the source
    /// data has overlapping rally/lunch slots.
    pub fn from_schedules(schedules: Vec<Schedule>) -> Result<Self, CatalogError> {
        for schedule in &schedules {
            if schedule.periods.is_empty() {
                return Err(CatalogError::EmptySchedule {
                    schedule: schedule.name.clone(),
                });
            }

            for period in &schedule.periods {
                let bad_time = |source| CatalogError::BadPeriodTime {
                    schedule: schedule.name.clone(),
                    period: period.name.clone(),
                    source,
                };
                let start = period.start_time().map_err(&bad_time)?;
                let end = period.end_time().map_err(&bad_time)?;

                if end < start {
                    return Err(CatalogError::InvertedPeriod {
                        schedule: schedule.name.clone(),
                        period: period.name.clone(),
                    });
                }
            }
        }

        Ok(Self { schedules })
    }

    pub fn get(&self, name: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.name == name)
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }
}

fn period(name: &str, start: &str, end: &str, duration_minutes: u32) -> Period {
    Period {
        name: name.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        duration_minutes,
    }
}

fn schedule(name: &str, periods: Vec<Period>) -> Schedule {
    Schedule {
        name: name.to_string(),
        periods,
    }
}

/// The Oxford Academy bell schedules.
fn builtin_schedules() -> Vec<Schedule> {
    vec![
        schedule(
            "Block (Even, Odd)",
            vec![
                period("Period 1/2", "8:35 AM", "9:55 AM", 80),
                period("Period 3/4", "10:00 AM", "11:25 AM", 85),
                period("Period 9 (Homeroom)", "11:30 AM", "11:50 AM", 20),
                period("Lunch", "11:50 AM", "12:20 PM", 30),
                period("Period 5/6", "12:25 PM", "1:50 PM", 85),
                period("Period 7/8", "1:55 PM", "3:20 PM", 85),
            ],
        ),
        schedule(
            "Monday",
            vec![
                period("Period 1", "9:15 AM", "9:55 AM", 40),
                period("Period 2", "9:59 AM", "10:34 AM", 35),
                period("Period 3", "10:39 AM", "11:14 AM", 35),
                period("Period 4", "11:18 AM", "11:53 AM", 35),
                period("Connections", "11:53 AM", "12:14 PM", 21),
                period("Lunch", "12:14 PM", "12:44 PM", 30),
                period("Period 5", "12:48 PM", "1:23 PM", 35),
                period("Period 6", "1:27 PM", "2:02 PM", 35),
                period("Period 7", "2:06 PM", "2:41 PM", 35),
                period("Period 8", "2:45 PM", "3:20 PM", 35),
            ],
        ),
        schedule(
            "Non-late Start",
            vec![
                period("Period 1", "8:30 AM", "9:21 AM", 51),
                period("Period 2", "9:25 AM", "10:08 AM", 43),
                period("Period 3", "10:12 AM", "10:55 AM", 43),
                period("Period 4", "10:59 AM", "11:42 AM", 43),
                period("Lunch", "11:42 AM", "12:12 PM", 30),
                period("Period 5", "12:16 PM", "12:59 PM", 43),
                period("Period 6", "1:03 PM", "1:46 PM", 43),
                period("Period 7", "1:50 PM", "2:33 PM", 43),
                period("Period 8", "2:37 PM", "3:20 PM", 43),
            ],
        ),
        schedule(
            "Assembly / Rally",
            vec![
                period("Period 1/2", "8:30 AM", "9:48 AM", 78),
                period("Period 3/4", "9:53 AM", "11:11 AM", 78),
                period("Rally (Grades 9-12)", "11:16 AM", "11:56 AM", 40),
                period("Lunch", "11:31 AM", "12:01 PM", 30),
                period("Rally (Grade 7-8)", "11:54 AM", "12:34 PM", 40),
                period("Period 5/6", "12:39 PM", "1:57 PM", 78),
                period("Period 7/8", "2:02 PM", "3:20 PM", 78),
            ],
        ),
        schedule(
            "Minimum Day",
            vec![
                period("Period 1/2", "8:30 AM", "9:35 AM", 65),
                period("Nutrition", "9:35 AM", "9:45 AM", 10),
                period("Period 3/4", "9:50 AM", "10:55 AM", 65),
                period("Period 5/6", "11:00 AM", "12:05 PM", 65),
                period("Period 7/8", "12:10 PM", "1:15 PM", 65),
            ],
        ),
        schedule(
            "Finals - Minimum Day",
            vec![
                period("Period 1/2", "8:30 AM", "9:15 AM", 45),
                period("Nutrition", "9:15 AM", "9:25 AM", 10),
                period("Period 3/4", "9:30 AM", "10:55 AM", 85),
                period("Period 5/6", "11:00 AM", "11:45 AM", 45),
                period("Period 7/8", "11:50 AM", "1:15 PM", 85),
            ],
        ),
        schedule(
            "Capstone Presentations",
            vec![
                period("Capstone Presentations", "8:30 AM", "10:15 AM", 105),
                period("Period 1/2", "10:30 AM", "11:30 AM", 60),
                period("Period 3/4", "11:35 AM", "12:35 PM", 60),
                period("Lunch", "12:35 PM", "1:05 PM", 30),
                period("Period 5/6", "1:10 PM", "2:10 PM", 60),
                period("Period 7/8", "2:15 PM", "3:20 PM", 65),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn builtin_catalog_should_pass_validation() {
        let catalog = ScheduleCatalog::load_builtin().unwrap();
        assert_eq!(catalog.schedules().len(), 7);
    }

    #[test]
    pub fn lookup_by_name_should_find_schedule() {
        let catalog = ScheduleCatalog::load_builtin().unwrap();
        let monday = catalog.get("Monday").unwrap();
        assert_eq!(monday.periods.len(), 10);
        assert!(monday.period("Connections").is_some());
    }

    #[test]
    pub fn unknown_schedule_should_return_none() {
        let catalog = ScheduleCatalog::load_builtin().unwrap();
        assert!(catalog.get("Tuesday").is_none());
    }

    #[test]
    pub fn schedule_with_unparsable_time_should_be_rejected() {
        let result = ScheduleCatalog::from_schedules(vec![schedule(
            "Broken",
            vec![period("Period 1", "8:30", "9:21 AM", 51)],
        )]);

        assert!(matches!(
            result,
            Err(CatalogError::BadPeriodTime { .. })
        ));
    }

    #[test]
    pub fn schedule_ending_before_it_starts_should_be_rejected() {
        let result = ScheduleCatalog::from_schedules(vec![schedule(
            "Broken",
            vec![period("Period 7/8", "11:50 PM", "1:15 PM", 85)],
        )]);

        assert!(matches!(result, Err(CatalogError::InvertedPeriod { .. })));
    }

    #[test]
    pub fn empty_schedule_should_be_rejected() {
        let result = ScheduleCatalog::from_schedules(vec![schedule("Empty", vec![])]);
        assert!(matches!(result, Err(CatalogError::EmptySchedule { .. })));
    }
}
