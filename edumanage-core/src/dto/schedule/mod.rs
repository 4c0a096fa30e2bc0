//! Schedule DTOs

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::schedule::Day;

/// Create or edit form for a schedule entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleForm {
    pub class_label: String,
    pub subject_id: i64,

    /// Defaults to the subject's owning teacher
    #[serde(default)]
    pub teacher_id: Option<i64>,

    pub day: Day,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Query parameters of the schedule list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleQuery {
    /// Matches subject name, teacher name or class label
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub class_label: Option<String>,

    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub day: Option<Day>,

    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub teacher_id: Option<i64>,
}

/// Day selector for the personal schedule view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayQuery {
    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub day: Option<Day>,
}
