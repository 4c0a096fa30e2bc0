//! Data Transfer Objects for the HTTP API
//!
//! Request and response bodies exchanged between the server and its
//! clients. Query-string parameter sets live alongside the bodies they
//! belong to.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod dashboard;
pub mod grade;
pub mod invoice;
pub mod page;
pub mod schedule;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

/// Deserialize an optional query-string selector, treating a blank value as
/// "not given". A form's "all" option submits `?gender=`, which must select
/// everything rather than fail to parse.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::gender::Gender;
    use crate::domain::grade::Semester;
    use crate::domain::invoice::InvoiceStatus;
    use crate::domain::schedule::Day;
    use crate::dto::grade::GradeQuery;
    use crate::dto::invoice::InvoiceQuery;
    use crate::dto::schedule::ScheduleQuery;
    use crate::dto::student::StudentQuery;

    #[test]
    fn test_blank_selectors_are_none() {
        let students: StudentQuery =
            serde_json::from_str(r#"{"search": "", "class_label": "", "gender": ""}"#).unwrap();
        assert_eq!(students.gender, None);

        let schedules: ScheduleQuery =
            serde_json::from_str(r#"{"day": "", "teacher_id": " "}"#).unwrap();
        assert_eq!(schedules.day, None);
        assert_eq!(schedules.teacher_id, None);

        let grades: GradeQuery =
            serde_json::from_str(r#"{"semester": "", "subject_id": ""}"#).unwrap();
        assert_eq!(grades.semester, None);
        assert_eq!(grades.subject_id, None);

        let invoices: InvoiceQuery =
            serde_json::from_str(r#"{"status": "", "student_id": ""}"#).unwrap();
        assert_eq!(invoices.status, None);
        assert_eq!(invoices.student_id, None);
    }

    #[test]
    fn test_selectors_parse_stored_labels() {
        let students: StudentQuery = serde_json::from_str(r#"{"gender": "Perempuan"}"#).unwrap();
        assert_eq!(students.gender, Some(Gender::Female));

        let schedules: ScheduleQuery =
            serde_json::from_str(r#"{"day": "Rabu", "teacher_id": "7"}"#).unwrap();
        assert_eq!(schedules.day, Some(Day::Wednesday));
        assert_eq!(schedules.teacher_id, Some(7));

        let grades: GradeQuery = serde_json::from_str(r#"{"semester": "Ganjil"}"#).unwrap();
        assert_eq!(grades.semester, Some(Semester::Odd));

        let invoices: InvoiceQuery =
            serde_json::from_str(r#"{"status": "Partially Paid"}"#).unwrap();
        assert_eq!(invoices.status, Some(InvoiceStatus::PartiallyPaid));
    }

    #[test]
    fn test_absent_and_unknown_selectors() {
        let schedules: ScheduleQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(schedules.day, None);

        assert!(serde_json::from_str::<StudentQuery>(r#"{"gender": "x"}"#).is_err());
        assert!(serde_json::from_str::<GradeQuery>(r#"{"subject_id": "abc"}"#).is_err());
    }
}
