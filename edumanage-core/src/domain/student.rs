//! Student ("siswa") domain model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::gender::Gender;

/// Student profile, 1:1 with a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,

    /// Student identification number (NIS)
    pub nis: String,

    pub name: String,

    /// Class / cohort label, e.g. "X IPA 1"
    pub class_label: String,

    pub gender: Gender,
    pub birth_place: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
}
