//! Repository Module
//!
//! Data access layer for the server.
//! Each repository handles database operations for a specific domain entity.

pub mod dashboard;
pub mod grade;
pub mod invoice;
pub mod permission;
pub mod schedule;
pub mod session;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

use std::str::FromStr;

use edumanage_core::domain::ParseEnumError;

// Re-export for convenience
pub use dashboard as dashboard_repository;
pub use grade as grade_repository;
pub use invoice as invoice_repository;
pub use permission as permission_repository;
pub use schedule as schedule_repository;
pub use session as session_repository;
pub use student as student_repository;
pub use subject as subject_repository;
pub use teacher as teacher_repository;
pub use user as user_repository;

/// Parse a text column into one of the core enums
fn decode<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = ParseEnumError>,
{
    value.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// `ILIKE` pattern for a free-text search, `None` when the search is blank
fn like_pattern(search: Option<&str>) -> Option<String> {
    let search = search.map(str::trim).filter(|s| !s.is_empty())?;
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}

/// Blank selectors match everything
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edumanage_core::domain::schedule::Day;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(Some("budi")), Some("%budi%".to_string()));
        assert_eq!(like_pattern(Some(" 100%_ ")), Some("%100\\%\\_%".to_string()));
        assert_eq!(like_pattern(Some("   ")), None);
        assert_eq!(like_pattern(None), None);
    }

    #[test]
    fn test_decode_reports_bad_values() {
        let day: Day = decode("Kamis").unwrap();
        assert_eq!(day, Day::Thursday);
        assert!(matches!(decode::<Day>("Minggu"), Err(sqlx::Error::Decode(_))));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" X-A ")), Some("X-A"));
        assert_eq!(non_blank(Some("")), None);
    }
}
