//! Schedule ("jadwal pelajaran") domain model
//!
//! A weekly lesson slot: one class, one subject, one teacher, one day.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseEnumError;

/// School day. Lessons run Monday to Saturday.
///
/// Ordering follows the week, not the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "Senin")]
    Monday,
    #[serde(rename = "Selasa")]
    Tuesday,
    #[serde(rename = "Rabu")]
    Wednesday,
    #[serde(rename = "Kamis")]
    Thursday,
    #[serde(rename = "Jumat")]
    Friday,
    #[serde(rename = "Sabtu")]
    Saturday,
}

impl Day {
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Map a calendar weekday to a school day. Sunday has no lessons.
    pub fn from_weekday(weekday: Weekday) -> Option<Day> {
        match weekday {
            Weekday::Mon => Some(Day::Monday),
            Weekday::Tue => Some(Day::Tuesday),
            Weekday::Wed => Some(Day::Wednesday),
            Weekday::Thu => Some(Day::Thursday),
            Weekday::Fri => Some(Day::Friday),
            Weekday::Sat => Some(Day::Saturday),
            Weekday::Sun => None,
        }
    }

    /// Stored (Indonesian) day name
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Senin",
            Day::Tuesday => "Selasa",
            Day::Wednesday => "Rabu",
            Day::Thursday => "Kamis",
            Day::Friday => "Jumat",
            Day::Saturday => "Sabtu",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("day", s))
    }
}

/// A weekly lesson slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub class_label: String,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day: Day,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Schedule entry joined with subject and teacher names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub entry: ScheduleEntry,
    pub subject_name: String,
    pub teacher_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_order_follows_week() {
        let mut days = vec![Day::Saturday, Day::Monday, Day::Wednesday, Day::Friday];
        days.sort();
        assert_eq!(
            days,
            vec![Day::Monday, Day::Wednesday, Day::Friday, Day::Saturday]
        );
    }

    #[test]
    fn test_sunday_has_no_school_day() {
        assert_eq!(Day::from_weekday(Weekday::Sun), None);
        assert_eq!(Day::from_weekday(Weekday::Mon), Some(Day::Monday));
        assert_eq!(Day::from_weekday(Weekday::Sat), Some(Day::Saturday));
    }

    #[test]
    fn test_day_names() {
        assert_eq!("Kamis".parse::<Day>().unwrap(), Day::Thursday);
        assert_eq!(Day::Friday.to_string(), "Jumat");
        assert!("Minggu".parse::<Day>().is_err());
        assert_eq!(serde_json::to_string(&Day::Tuesday).unwrap(), "\"Selasa\"");
    }
}
