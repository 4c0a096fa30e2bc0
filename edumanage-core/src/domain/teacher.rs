//! Teacher ("guru") domain model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::gender::Gender;

/// Teacher profile, 1:1 with a user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,

    /// Staff identification number (NIP)
    pub nip: String,

    pub name: String,
    pub specialization: Option<String>,
    pub gender: Gender,
    pub birth_place: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
}
