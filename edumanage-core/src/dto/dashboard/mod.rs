//! Dashboard DTOs
//!
//! One summary per role, served at `/dashboard/{admin|guru|siswa}`.

use serde::{Deserialize, Serialize};

use crate::domain::schedule::{Day, ScheduleView};
use crate::domain::student::Student;
use crate::domain::teacher::Teacher;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub student_count: i64,
    pub teacher_count: i64,

    /// Distinct class labels that appear in the schedule
    pub class_count: i64,

    pub subject_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherDashboard {
    pub profile: Teacher,

    /// `None` on Sundays
    pub today: Option<Day>,

    pub today_schedule: Vec<ScheduleView>,

    /// Classes this teacher has lessons with
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDashboard {
    pub profile: Student,
    pub today: Option<Day>,
    pub today_schedule: Vec<ScheduleView>,

    /// Academic years the student has grades in
    pub academic_years: Vec<String>,
}
