//! User domain model
//!
//! A login account. Students and teachers each own exactly one user; admins
//! have no profile row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;
use super::student::Student;
use super::teacher::Teacher;

/// A user account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// User joined with its role-specific profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub student: Option<Student>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub teacher: Option<Teacher>,
}

impl UserView {
    /// Display name: the profile name when there is one, else the username
    pub fn display_name(&self) -> &str {
        if let Some(student) = &self.student {
            &student.name
        } else if let Some(teacher) = &self.teacher {
            &teacher.name
        } else {
            &self.user.username
        }
    }
}
