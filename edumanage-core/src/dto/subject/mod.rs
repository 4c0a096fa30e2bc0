//! Subject DTOs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubject {
    pub name: String,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectQuery {
    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub teacher_id: Option<i64>,
}
