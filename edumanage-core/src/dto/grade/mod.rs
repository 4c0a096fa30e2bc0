//! Grade DTOs

use serde::{Deserialize, Serialize};

use crate::domain::grade::Semester;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub score: f64,
    pub semester: Semester,
    pub academic_year: String,
}

/// Editable fields of an existing grade. Student and subject are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGrade {
    pub score: f64,
    pub semester: Semester,
    pub academic_year: String,
}

/// Query parameters of the grade list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradeQuery {
    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub semester: Option<Semester>,

    #[serde(default)]
    pub academic_year: Option<String>,

    #[serde(default)]
    pub class_label: Option<String>,

    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub subject_id: Option<i64>,
}
