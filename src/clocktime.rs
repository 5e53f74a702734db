use std::{fmt, str::FromStr};

use chrono::NaiveTime;
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 1440;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockTimeParseError {
    #[error("'{0}' does not match 'h:mm AM/PM'")]
    Malformed(String),

    #[error("hour {0} is outside 1-12")]
    HourOutOfRange(u32),

    #[error("minute {0} is outside 0-59")]
    MinuteOutOfRange(u32),
}

/// Wall-clock time with no date component, stored as minute-of-day in
/// `[0, 1439]`. 12:00 AM is minute 0, 12:00 PM is minute 720.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_minute_of_day(minute: u16) -> Option<Self> {
        if minute < MINUTES_PER_DAY {
            Some(Self(minute))
        } else {
            None
        }
    }

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    pub fn minute_of_day(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour().into(), self.minute().into(), 0)
            .expect("Minute-of-day is always a valid time of day.")
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeParseError;

    /// Parses a 12-hour clock string such as `"8:35 AM"` or `"12:20 pm"`.
    /// The meridiem marker is matched case-insensitively anywhere after the
    /// minutes, matching how the catalog data is written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockTimeParseError::Malformed(s.to_string());

        let (hour_text, rest) = s.split_once(':').ok_or_else(|| malformed())?;
        let hour: u32 = hour_text.trim().parse().map_err(|_| malformed())?;

        let rest = rest.trim_start();
        let digits: &str = rest
            .split_once(|c: char| !c.is_ascii_digit())
            .map(|(digits, _)| digits)
            .unwrap_or(rest);
        if digits.is_empty() {
            return Err(malformed());
        }
        let minute: u32 = digits.parse().map_err(|_| malformed())?;

        let tail = rest[digits.len()..].to_ascii_uppercase();
        let is_pm = if tail.contains("PM") {
            true
        } else if tail.contains("AM") {
            false
        } else {
            return Err(malformed());
        };

        if !(1..=12).contains(&hour) {
            return Err(ClockTimeParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockTimeParseError::MinuteOutOfRange(minute));
        }

        let hour24 = match (is_pm, hour) {
            (true, h) if h != 12 => h + 12,
            (false, 12) => 0,
            (_, h) => h,
        };

        Ok(Self((hour24 * 60 + minute) as u16))
    }
}

/// e.g. `8:35 AM`
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour24 = self.hour();
        let meridiem = if hour24 < 12 { "AM" } else { "PM" };
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{}:{:02} {}", hour12, self.minute(), meridiem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    pub fn midnight_should_parse_to_minute_zero() {
        assert_eq!(parse("12:00 AM").minute_of_day(), 0);
    }

    #[test]
    pub fn noon_should_parse_to_minute_720() {
        assert_eq!(parse("12:00 PM").minute_of_day(), 720);
    }

    #[test]
    pub fn afternoon_hour_should_be_offset_by_twelve_hours() {
        assert_eq!(parse("1:05 PM").minute_of_day(), 785);
    }

    #[test]
    pub fn morning_hour_should_parse_as_is() {
        assert_eq!(parse("8:35 AM").minute_of_day(), 8 * 60 + 35);
    }

    #[test]
    pub fn meridiem_should_be_case_insensitive() {
        assert_eq!(parse("3:20 pm"), parse("3:20 PM"));
    }

    #[test]
    pub fn double_digit_and_single_digit_hours_should_both_parse() {
        assert_eq!(parse("09:05 AM"), parse("9:05 AM"));
    }

    #[test]
    pub fn missing_meridiem_should_be_rejected() {
        assert!(matches!(
            "8:35".parse::<ClockTime>(),
            Err(ClockTimeParseError::Malformed(_))
        ));
    }

    #[test]
    pub fn missing_colon_should_be_rejected() {
        assert!(matches!(
            "835 AM".parse::<ClockTime>(),
            Err(ClockTimeParseError::Malformed(_))
        ));
    }

    #[test]
    pub fn hour_zero_should_be_rejected() {
        assert_eq!(
            "0:30 AM".parse::<ClockTime>(),
            Err(ClockTimeParseError::HourOutOfRange(0))
        );
    }

    #[test]
    pub fn hour_above_twelve_should_be_rejected() {
        assert_eq!(
            "13:30 PM".parse::<ClockTime>(),
            Err(ClockTimeParseError::HourOutOfRange(13))
        );
    }

    #[test]
    pub fn minute_above_fifty_nine_should_be_rejected() {
        assert_eq!(
            "8:60 AM".parse::<ClockTime>(),
            Err(ClockTimeParseError::MinuteOutOfRange(60))
        );
    }

    proptest! {
        #[test]
        fn every_minute_of_day_should_round_trip_through_display(minute in 0u16..1440) {
            let time = ClockTime::from_minute_of_day(minute).unwrap();
            let reparsed: ClockTime = time.to_string().parse().unwrap();
            prop_assert_eq!(time, reparsed);
        }

        #[test]
        fn valid_clock_strings_should_always_parse(hour in 1u32..=12, minute in 0u32..=59, pm in any::<bool>()) {
            let text = format!("{}:{:02} {}", hour, minute, if pm { "PM" } else { "AM" });
            let parsed: ClockTime = text.parse().unwrap();
            prop_assert!(parsed.minute_of_day() < MINUTES_PER_DAY);
        }
    }

    fn parse(text: &str) -> ClockTime {
        text.parse().unwrap()
    }
}
