use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A day or time code outside the recognized slot vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotCodeError {
    #[error("Unknown weekday code: {0}")]
    UnknownDay(String),

    #[error("Unknown time code: {0}")]
    UnknownTime(String),
}

/// Weekday codes used in tutor availability and booking links
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }

    /// Display name shown on profile and booking pages
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "Понедельник",
            Weekday::Tue => "Вторник",
            Weekday::Wed => "Среда",
            Weekday::Thu => "Четверг",
            Weekday::Fri => "Пятница",
            Weekday::Sat => "Суббота",
            Weekday::Sun => "Воскресенье",
        }
    }
}

impl FromStr for Weekday {
    type Err = SlotCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.code() == s)
            .ok_or_else(|| SlotCodeError::UnknownDay(s.to_string()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Bookable hour, identified by its start hour code ("8", "10", ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot(8),
        TimeSlot(10),
        TimeSlot(12),
        TimeSlot(14),
        TimeSlot(16),
    ];

    pub fn hour(self) -> u8 {
        self.0
    }

    pub fn code(self) -> String {
        self.0.to_string()
    }

    pub fn label(self) -> String {
        format!("{}:00", self.0)
    }
}

impl FromStr for TimeSlot {
    type Err = SlotCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .map(TimeSlot)
            .filter(|slot| TimeSlot::ALL.contains(slot))
            .ok_or_else(|| SlotCodeError::UnknownTime(s.to_string()))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = SlotCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.code()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Weekly-hours choices offered on the guided-matching request form
pub const WEEKLY_HOURS: [(&str, &str); 4] = [
    ("1-2", "1-2 часа в неделю"),
    ("3-5", "3-5 часов в неделю"),
    ("5-7", "5-7 часов в неделю"),
    ("7-9", "7-9 часов в неделю"),
];

/// Display label of a weekly-hours choice
pub fn weekly_hours_label(code: &str) -> Option<&'static str> {
    WEEKLY_HOURS
        .iter()
        .find(|(value, _)| *value == code)
        .map(|(_, label)| *label)
}

/// Parse a (day, time) pair, rejecting codes outside the vocabulary
pub fn parse_slot(day: &str, time: &str) -> Result<(Weekday, TimeSlot), SlotCodeError> {
    Ok((day.parse()?, time.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_codes_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(day.code().parse::<Weekday>(), Ok(day));
        }
        assert_eq!(
            "xx".parse::<Weekday>(),
            Err(SlotCodeError::UnknownDay("xx".to_string()))
        );
    }

    #[test]
    fn test_time_slot_vocabulary() {
        assert_eq!("8".parse::<TimeSlot>().map(TimeSlot::hour), Ok(8));
        assert_eq!("16".parse::<TimeSlot>().map(|t| t.label()), Ok("16:00".to_string()));
        assert!("9".parse::<TimeSlot>().is_err());
        assert!("8:00".parse::<TimeSlot>().is_err());
        assert!("".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_time_slot_serializes_as_code() {
        let json = serde_json::to_string(&TimeSlot(10)).unwrap();
        assert_eq!(json, "\"10\"");

        let parsed: Result<TimeSlot, _> = serde_json::from_str("\"11\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot("mon", "8"), Ok((Weekday::Mon, TimeSlot(8))));
        assert!(matches!(parse_slot("xx", "8"), Err(SlotCodeError::UnknownDay(_))));
        assert!(matches!(parse_slot("mon", "7"), Err(SlotCodeError::UnknownTime(_))));
    }

    #[test]
    fn test_weekly_hours() {
        assert_eq!(weekly_hours_label("3-5"), Some("3-5 часов в неделю"));
        assert_eq!(weekly_hours_label("10-12"), None);
    }
}
