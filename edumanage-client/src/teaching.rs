//! Subject, schedule and grade endpoints

use crate::EduManageClient;
use crate::error::Result;
use edumanage_core::domain::grade::GradeView;
use edumanage_core::domain::schedule::ScheduleView;
use edumanage_core::domain::subject::Subject;
use edumanage_core::dto::grade::GradeQuery;
use edumanage_core::dto::schedule::{ScheduleForm, ScheduleQuery};
use edumanage_core::dto::subject::{CreateSubject, SubjectQuery};

impl EduManageClient {
    // =============================================================================
    // Subjects
    // =============================================================================

    /// List subjects, optionally of one teacher
    pub async fn list_subjects(&self, query: &SubjectQuery) -> Result<Vec<Subject>> {
        let response = self
            .client
            .get(self.url("/api/subjects"))
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a subject
    pub async fn create_subject(&self, req: &CreateSubject) -> Result<Subject> {
        let response = self
            .client
            .post(self.url("/api/subjects"))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Schedules
    // =============================================================================

    /// Filtered timetable ordered through the week
    pub async fn list_schedules(&self, query: &ScheduleQuery) -> Result<Vec<ScheduleView>> {
        let response = self
            .client
            .get(self.url("/api/schedules"))
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a schedule entry
    pub async fn create_schedule(&self, form: &ScheduleForm) -> Result<ScheduleView> {
        let response = self
            .client
            .post(self.url("/api/schedules"))
            .json(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a schedule entry
    pub async fn delete_schedule(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/schedules/{}", id)))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Grades
    // =============================================================================

    /// Grades visible to the signed-in admin or teacher
    pub async fn list_grades(&self, query: &GradeQuery) -> Result<Vec<GradeView>> {
        let response = self
            .client
            .get(self.url("/api/grades"))
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// The signed-in student's own grades
    pub async fn my_grades(&self, query: &GradeQuery) -> Result<Vec<GradeView>> {
        let response = self
            .client
            .get(self.url("/api/me/grades"))
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
