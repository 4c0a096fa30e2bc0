//! Role domain model
//!
//! Every user has exactly one role. The numeric ids match the seeded
//! `roles` table.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseEnumError;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// School administrator (id 1)
    #[serde(rename = "admin")]
    Admin,

    /// Teacher, "guru" (id 2)
    #[serde(rename = "guru")]
    Teacher,

    /// Student, "siswa" (id 3)
    #[serde(rename = "siswa")]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    /// Look up a role by its stored id
    pub fn from_id(id: i16) -> Option<Role> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Teacher),
            3 => Some(Role::Student),
            _ => None,
        }
    }

    pub fn id(self) -> i16 {
        match self {
            Role::Admin => 1,
            Role::Teacher => 2,
            Role::Student => 3,
        }
    }

    /// Stored role name
    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "guru",
            Role::Student => "siswa",
        }
    }

    /// Landing page for an authenticated user with this role
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Admin => "/dashboard/admin",
            Role::Teacher => "/dashboard/guru",
            Role::Student => "/dashboard/siswa",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| ParseEnumError::new("role", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(4), None);
    }

    #[test]
    fn test_dashboard_paths() {
        assert_eq!(Role::Admin.dashboard_path(), "/dashboard/admin");
        assert_eq!(Role::Teacher.dashboard_path(), "/dashboard/guru");
        assert_eq!(Role::Student.dashboard_path(), "/dashboard/siswa");
    }

    #[test]
    fn test_role_serializes_with_stored_name() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"guru\"");
        assert_eq!("siswa".parse::<Role>().unwrap(), Role::Student);
        assert!("teacher".parse::<Role>().is_err());
    }
}
