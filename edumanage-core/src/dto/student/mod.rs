//! Student DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::gender::Gender;

/// Editable student profile fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    pub nis: String,
    pub name: String,
    pub class_label: String,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default)]
    pub birth_place: Option<String>,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    pub address: Option<String>,
}

/// Request to enrol a new student together with their login account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudent {
    pub username: String,
    pub password: String,
    pub profile: StudentProfile,
}

/// Query parameters of the student list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentQuery {
    /// Matches name or NIS, case-insensitive
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub class_label: Option<String>,

    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub gender: Option<Gender>,
}
