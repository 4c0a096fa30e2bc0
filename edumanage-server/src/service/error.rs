//! Service error type shared by every service module

use std::fmt;

use sqlx::error::ErrorKind;

#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    ValidationError(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InternalError(String),
    DatabaseError(sqlx::Error),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        ServiceError::NotFound(format!("{} {} not found", entity, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::ValidationError(msg.into())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(msg)
            | ServiceError::ValidationError(msg)
            | ServiceError::Unauthorized(msg)
            | ServiceError::Forbidden(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::InternalError(msg) => write!(f, "{}", msg),
            ServiceError::DatabaseError(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return ServiceError::Conflict(conflict_message(db_err.constraint()));
                }
                ErrorKind::ForeignKeyViolation => {
                    return ServiceError::ValidationError(
                        "Referenced record does not exist".to_string(),
                    );
                }
                ErrorKind::CheckViolation => {
                    return ServiceError::ValidationError(format!(
                        "Value rejected by constraint {}",
                        db_err.constraint().unwrap_or("check")
                    ));
                }
                _ => {}
            }
        }
        ServiceError::DatabaseError(err)
    }
}

/// Human readable message for a unique constraint violation
fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("users_username_key") => "Username already exists".to_string(),
        Some("students_nis_key") => "NIS already registered".to_string(),
        Some("teachers_nip_key") => "NIP already registered".to_string(),
        Some("students_user_id_key") | Some("teachers_user_id_key") => {
            "User already has a profile".to_string()
        }
        Some(name) if name.starts_with("grades_") => {
            "Grade already recorded for this student, subject and semester".to_string()
        }
        _ => "Record already exists".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        assert_eq!(conflict_message(Some("users_username_key")), "Username already exists");
        assert_eq!(conflict_message(Some("students_nis_key")), "NIS already registered");
        assert_eq!(
            conflict_message(Some("grades_student_id_subject_id_semester_academic_year_key")),
            "Grade already recorded for this student, subject and semester"
        );
        assert_eq!(conflict_message(None), "Record already exists");
    }

    #[test]
    fn test_row_not_found_stays_database_error() {
        let err = ServiceError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }

    #[test]
    fn test_display_uses_message() {
        assert_eq!(ServiceError::not_found("Student", 7).to_string(), "Student 7 not found");
    }
}
