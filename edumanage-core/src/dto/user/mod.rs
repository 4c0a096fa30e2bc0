//! User account DTOs

use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::dto::student::StudentProfile;
use crate::dto::teacher::TeacherProfile;

/// Request to create a user account and its role profile
///
/// Teachers need a `teacher` profile, students a `student` profile; admins
/// have none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub role: Role,

    #[serde(default)]
    pub student: Option<StudentProfile>,

    #[serde(default)]
    pub teacher: Option<TeacherProfile>,
}

/// Request to update a user account. An absent password is left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: String,

    #[serde(default)]
    pub password: Option<String>,

    pub role: Role,

    #[serde(default)]
    pub student: Option<StudentProfile>,

    #[serde(default)]
    pub teacher: Option<TeacherProfile>,
}

/// Query parameters of the user list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserQuery {
    /// Matches username or role name, case-insensitive
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub role: Option<Role>,
}
