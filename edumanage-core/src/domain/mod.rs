//! Core domain types
//!
//! Plain relational rows as seen by the rest of the system. Persistence lives
//! in the server's repositories; these types carry structure only.

pub mod gender;
pub mod grade;
pub mod invoice;
pub mod permission;
pub mod role;
pub mod schedule;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

/// Error returned when a stored or submitted enum label is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
