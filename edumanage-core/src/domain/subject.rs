//! Subject ("mata pelajaran") domain model

use serde::{Deserialize, Serialize};

/// A subject owned by one teacher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,

    /// Owning teacher's name, filled in by list queries
    #[serde(default)]
    pub teacher_name: Option<String>,
}
