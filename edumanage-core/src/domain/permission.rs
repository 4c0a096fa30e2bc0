//! Permission names
//!
//! Permissions are granted per role through the `role_permissions` table.
//! These are the names the server checks for.

pub const VIEW_FINANCIAL_DATA: &str = "VIEW_FINANCIAL_DATA";
pub const MANAGE_FINANCIAL_DATA: &str = "MANAGE_FINANCIAL_DATA";
pub const MANAGE_USERS: &str = "MANAGE_USERS";
pub const MANAGE_SCHEDULES: &str = "MANAGE_SCHEDULES";
pub const VIEW_STUDENT_GRADES: &str = "VIEW_STUDENT_GRADES";
pub const EDIT_STUDENT_GRADES: &str = "EDIT_STUDENT_GRADES";
pub const VIEW_OWN_GRADES: &str = "VIEW_OWN_GRADES";

/// Every permission known to the system, in seeding order
pub const ALL: [&str; 7] = [
    VIEW_FINANCIAL_DATA,
    MANAGE_FINANCIAL_DATA,
    MANAGE_USERS,
    MANAGE_SCHEDULES,
    VIEW_STUDENT_GRADES,
    EDIT_STUDENT_GRADES,
    VIEW_OWN_GRADES,
];
