//! Teacher DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::gender::Gender;

/// Editable teacher profile fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeacherProfile {
    pub nip: String,
    pub name: String,

    #[serde(default)]
    pub specialization: Option<String>,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default)]
    pub birth_place: Option<String>,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    pub address: Option<String>,
}

/// Query parameters of the teacher list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherQuery {
    /// Matches name, NIP or specialization, case-insensitive
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub gender: Option<Gender>,
}
