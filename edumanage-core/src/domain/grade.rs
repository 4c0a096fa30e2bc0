//! Grade ("nilai") domain model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseEnumError;

/// Lowest accepted score
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score
pub const MAX_SCORE: f64 = 100.0;

/// Semester of an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    /// First (odd) semester
    #[serde(rename = "Ganjil")]
    Odd,

    /// Second (even) semester
    #[serde(rename = "Genap")]
    Even,
}

impl Semester {
    pub fn as_str(self) -> &'static str {
        match self {
            Semester::Odd => "Ganjil",
            Semester::Even => "Genap",
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ganjil" => Ok(Semester::Odd),
            "Genap" => Ok(Semester::Even),
            _ => Err(ParseEnumError::new("semester", s)),
        }
    }
}

/// A student's score in one subject for one semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub score: f64,
    pub semester: Semester,

    /// Academic year, e.g. "2023/2024"
    pub academic_year: String,
}

/// Grade joined with student and subject details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeView {
    #[serde(flatten)]
    pub grade: Grade,
    pub student_name: String,
    pub student_nis: String,
    pub class_label: String,
    pub subject_name: String,
    pub teacher_id: i64,
}

/// Check an academic year label of the form `YYYY/YYYY` where the second
/// year directly follows the first.
pub fn is_valid_academic_year(year: &str) -> bool {
    let Some((first, second)) = year.split_once('/') else {
        return false;
    };

    if first.len() != 4 || second.len() != 4 {
        return false;
    }

    match (first.parse::<u16>(), second.parse::<u16>()) {
        (Ok(first), Ok(second)) => second == first + 1,
        _ => false,
    }
}

pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_year_format() {
        assert!(is_valid_academic_year("2023/2024"));
        assert!(!is_valid_academic_year("2023/2025"));
        assert!(!is_valid_academic_year("2023-2024"));
        assert!(!is_valid_academic_year("23/24"));
        assert!(!is_valid_academic_year("abcd/efgh"));
        assert!(!is_valid_academic_year(""));
    }

    #[test]
    fn test_score_range() {
        assert!(is_valid_score(0.0));
        assert!(is_valid_score(87.5));
        assert!(is_valid_score(100.0));
        assert!(!is_valid_score(-0.5));
        assert!(!is_valid_score(100.1));
        assert!(!is_valid_score(f64::NAN));
    }

    #[test]
    fn test_semester_labels() {
        assert_eq!("Genap".parse::<Semester>().unwrap(), Semester::Even);
        assert_eq!(Semester::Odd.to_string(), "Ganjil");
        assert!("odd".parse::<Semester>().is_err());
    }
}
