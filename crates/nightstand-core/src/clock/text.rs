//! Derivation of the four display strings from a wall-clock reading.

use core::fmt::Write;

use heapless::String as HeaplessString;
use time::{Date, Time};

/// Hour, minute and second of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallClock {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn from_time(time: Time) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }
}

/// 12-hour (with AM/PM marker) or 24-hour display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl HourFormat {
    pub const fn shows_am_pm(self) -> bool {
        matches!(self, Self::TwelveHour)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::TwelveHour => Self::TwentyFourHour,
            Self::TwentyFourHour => Self::TwelveHour,
        }
    }

    /// Hour as shown on the face. Midnight and noon read "12" in 12-hour mode.
    pub const fn display_hour(self, hour: u8) -> u8 {
        match self {
            Self::TwentyFourHour => hour,
            Self::TwelveHour => match hour % 12 {
                0 => 12,
                h => h,
            },
        }
    }
}

pub type HourMinutesText = HeaplessString<8>;
pub type SecondsText = HeaplessString<4>;
pub type AmPmText = HeaplessString<4>;
pub type DateText = HeaplessString<48>;

/// Strings drawn for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    /// "H:MM"
    pub hour_minutes: HourMinutesText,
    /// "SS"
    pub seconds: SecondsText,
    /// "AM" / "PM", only drawn in 12-hour mode
    pub am_pm: AmPmText,
    /// "<weekday>, <month> <day>, <year>"
    pub date: DateText,
}

impl DisplayText {
    pub fn new(clock: WallClock, date: Date, format: HourFormat) -> Self {
        let mut hour_minutes = HourMinutesText::new();
        write!(
            &mut hour_minutes,
            "{}:{:02}",
            format.display_hour(clock.hour),
            clock.minute
        )
        .ok();

        let mut seconds = SecondsText::new();
        write!(&mut seconds, "{:02}", clock.second).ok();

        let mut am_pm = AmPmText::new();
        am_pm.push_str(am_pm_marker(clock.hour)).ok();

        Self {
            hour_minutes,
            seconds,
            am_pm,
            date: format_date(date),
        }
    }
}

pub const fn am_pm_marker(hour: u8) -> &'static str {
    if hour <= 11 { "AM" } else { "PM" }
}

/// Long-form date, e.g. "Monday, October 19, 2026".
pub fn format_date(date: Date) -> DateText {
    let mut text = DateText::new();
    write!(
        &mut text,
        "{}, {} {}, {}",
        date.weekday(),
        date.month(),
        date.day(),
        date.year()
    )
    .ok();
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn date() -> Date {
        Date::from_calendar_date(2026, Month::October, 19).unwrap()
    }

    #[test]
    fn test_afternoon_in_twelve_hour_mode() {
        let text = DisplayText::new(WallClock::new(14, 5, 9), date(), HourFormat::TwelveHour);
        assert_eq!(text.hour_minutes.as_str(), "2:05");
        assert_eq!(text.seconds.as_str(), "09");
        assert_eq!(text.am_pm.as_str(), "PM");
    }

    #[test]
    fn test_midnight_and_noon_read_twelve() {
        let midnight = DisplayText::new(WallClock::new(0, 0, 0), date(), HourFormat::TwelveHour);
        assert_eq!(midnight.hour_minutes.as_str(), "12:00");
        assert_eq!(midnight.am_pm.as_str(), "AM");

        let noon = DisplayText::new(WallClock::new(12, 30, 0), date(), HourFormat::TwelveHour);
        assert_eq!(noon.hour_minutes.as_str(), "12:30");
        assert_eq!(noon.am_pm.as_str(), "PM");
    }

    #[test]
    fn test_twenty_four_hour_mode() {
        let text = DisplayText::new(
            WallClock::new(0, 7, 59),
            date(),
            HourFormat::TwentyFourHour,
        );
        assert_eq!(text.hour_minutes.as_str(), "0:07");
        assert_eq!(text.seconds.as_str(), "59");

        let evening = DisplayText::new(
            WallClock::new(23, 59, 0),
            date(),
            HourFormat::TwentyFourHour,
        );
        assert_eq!(evening.hour_minutes.as_str(), "23:59");
    }

    #[test]
    fn test_am_pm_boundary() {
        assert_eq!(am_pm_marker(11), "AM");
        assert_eq!(am_pm_marker(12), "PM");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(format_date(date()).as_str(), "Monday, October 19, 2026");

        let longest = Date::from_calendar_date(2025, Month::September, 24).unwrap();
        assert_eq!(
            format_date(longest).as_str(),
            "Wednesday, September 24, 2025"
        );
    }
}
