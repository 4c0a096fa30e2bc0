//! Service Module
//!
//! Business logic layer for the server.
//! Services orchestrate between repositories and contain domain logic:
//! validation, ownership rules and multi-table transactions.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod grade;
pub mod invoice;
pub mod permission;
pub mod schedule;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

// Re-export for convenience
pub use auth as auth_service;
pub use dashboard as dashboard_service;
pub use grade as grade_service;
pub use invoice as invoice_service;
pub use permission as permission_service;
pub use schedule as schedule_service;
pub use student as student_service;
pub use subject as subject_service;
pub use teacher as teacher_service;
pub use user as user_service;
