use chrono::{Datelike, NaiveDate, Weekday};

/// What kind of day an entry marks. Mirrors the district calendar's
/// categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SchoolEvent,
    Holiday,
    NoSchool,
    TeacherDay,
    StaffDevelopment,
    QuarterEnd,
    MinimumDay,
    UsHoliday,
}

impl EventKind {
    /// Whether classes are out on a day carrying this event.
    pub fn closes_school(&self) -> bool {
        matches!(self, EventKind::NoSchool | EventKind::Holiday)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub name: String,
    pub kind: EventKind,
}

/// The school-year event calendar: a static ordered list with date lookup
/// helpers. Read-only after load.
#[derive(Debug, Clone)]
pub struct SchoolCalendar {
    events: Vec<CalendarEvent>,
}

impl SchoolCalendar {
    pub fn load_builtin() -> Self {
        let events = BUILTIN_EVENTS
            .iter()
            .map(|(year, month, day, name, kind)| CalendarEvent {
                date: NaiveDate::from_ymd_opt(*year, *month, *day)
                    .expect("Builtin calendar dates are valid."),
                name: (*name).to_string(),
                kind: *kind,
            })
            .collect();

        Self { events }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    pub fn next_event_after(&self, date: NaiveDate) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.date > date)
    }

    /// A weekday with no school-closing event. Does not know about summer
    /// break boundaries beyond what the event list encodes.
    pub fn is_school_day(&self, date: NaiveDate) -> bool {
        let weekday = matches!(
            date.weekday(),
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri
        );

        weekday
            && !self
                .events_on(date)
                .iter()
                .any(|e| e.kind.closes_school())
    }
}

use EventKind::*;

/// The 2024-25 AUHSD calendar.
const BUILTIN_EVENTS: &[(i32, u32, u32, &str, EventKind)] = &[
    (2024, 7, 4, "Independence Day", UsHoliday),
    (2024, 8, 5, "Staff Development Day", StaffDevelopment),
    (2024, 8, 6, "Teacher Day", TeacherDay),
    (2024, 8, 7, "School Begins", SchoolEvent),
    (2024, 9, 2, "Labor Day", NoSchool),
    (2024, 9, 13, "Progress Reports Due", SchoolEvent),
    (2024, 10, 4, "End of Quarter 1", QuarterEnd),
    (2024, 10, 7, "Staff Development Day", StaffDevelopment),
    (2024, 10, 11, "Grades Due", SchoolEvent),
    (2024, 10, 14, "Columbus Day/Indigenous Peoples' Day", UsHoliday),
    (2024, 11, 8, "Progress Reports Due", SchoolEvent),
    (2024, 11, 11, "Veterans Day", NoSchool),
    (2024, 11, 25, "Thanksgiving Break", NoSchool),
    (2024, 11, 26, "Thanksgiving Break", NoSchool),
    (2024, 11, 27, "Thanksgiving Break", NoSchool),
    (2024, 11, 28, "Thanksgiving Day", NoSchool),
    (2024, 11, 29, "Thanksgiving Break", NoSchool),
    (2024, 12, 19, "End of Quarter 2", QuarterEnd),
    (2024, 12, 20, "Winter Break Begins", NoSchool),
    (2024, 12, 23, "Winter Break", NoSchool),
    (2024, 12, 24, "Christmas Eve", NoSchool),
    (2024, 12, 25, "Christmas Day", NoSchool),
    (2024, 12, 26, "Winter Break", NoSchool),
    (2024, 12, 27, "Winter Break", NoSchool),
    (2024, 12, 30, "Winter Break", NoSchool),
    (2024, 12, 31, "New Year's Eve", NoSchool),
    (2025, 1, 1, "New Year's Day", NoSchool),
    (2025, 1, 2, "Winter Break", NoSchool),
    (2025, 1, 3, "Winter Break", NoSchool),
    (2025, 1, 10, "Grades Due", SchoolEvent),
    (2025, 1, 20, "Martin Luther King Jr. Day", NoSchool),
    (2025, 2, 7, "Progress Reports Due", SchoolEvent),
    (2025, 2, 10, "Lincoln's Birthday", NoSchool),
    (2025, 2, 14, "Valentine's Day", UsHoliday),
    (2025, 2, 17, "Presidents' Day", NoSchool),
    (2025, 3, 14, "End of Quarter 3", QuarterEnd),
    (2025, 3, 17, "Start of Quarter 4", SchoolEvent),
    (2025, 3, 21, "Grades Due", SchoolEvent),
    (2025, 3, 24, "Spring Break", NoSchool),
    (2025, 3, 25, "Spring Break", NoSchool),
    (2025, 3, 26, "Spring Break", NoSchool),
    (2025, 3, 27, "Spring Break", NoSchool),
    (2025, 3, 28, "Spring Break", NoSchool),
    (2025, 3, 31, "Cesar Chavez Day", UsHoliday),
    (2025, 4, 18, "Progress Reports Due", SchoolEvent),
    (2025, 5, 22, "End of Quarter 4", QuarterEnd),
    (2025, 5, 23, "Last Day of School", SchoolEvent),
    (2025, 5, 23, "Grades Due", SchoolEvent),
    (2025, 5, 26, "Memorial Day", NoSchool),
    (2025, 5, 27, "Underlined Day", SchoolEvent),
    (2025, 5, 28, "Underlined Day", SchoolEvent),
    (2025, 5, 29, "Underlined Day", SchoolEvent),
    (2025, 5, 30, "Underlined Day", SchoolEvent),
    (2025, 6, 2, "Underlined Day", SchoolEvent),
    (2025, 6, 19, "Juneteenth", UsHoliday),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn builtin_calendar_should_load_in_date_order() {
        let calendar = SchoolCalendar::load_builtin();
        assert!(!calendar.events().is_empty());
        assert!(
            calendar
                .events()
                .windows(2)
                .all(|pair| pair[0].date <= pair[1].date)
        );
    }

    #[test]
    pub fn a_date_may_carry_multiple_events() {
        let calendar = SchoolCalendar::load_builtin();
        let events = calendar.events_on(date(2025, 5, 23));
        assert_eq!(events.len(), 2);
    }

    #[test]
    pub fn no_school_day_should_not_be_a_school_day() {
        let calendar = SchoolCalendar::load_builtin();
        // Thanksgiving Day, a Thursday.
        assert!(!calendar.is_school_day(date(2024, 11, 28)));
    }

    #[test]
    pub fn weekend_should_not_be_a_school_day() {
        let calendar = SchoolCalendar::load_builtin();
        // A Saturday with no event on it.
        assert!(!calendar.is_school_day(date(2024, 9, 7)));
    }

    #[test]
    pub fn plain_weekday_should_be_a_school_day() {
        let calendar = SchoolCalendar::load_builtin();
        // A Wednesday with no event.
        assert!(calendar.is_school_day(date(2024, 9, 11)));
    }

    #[test]
    pub fn quarter_end_should_still_be_a_school_day() {
        let calendar = SchoolCalendar::load_builtin();
        assert!(calendar.is_school_day(date(2024, 10, 4)));
    }

    #[test]
    pub fn next_event_should_skip_past_dates() {
        let calendar = SchoolCalendar::load_builtin();
        let next = calendar.next_event_after(date(2024, 12, 31)).unwrap();
        assert_eq!(next.name, "New Year's Day");
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}
