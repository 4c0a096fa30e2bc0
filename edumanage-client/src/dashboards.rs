//! Role dashboard endpoints

use crate::EduManageClient;
use crate::error::Result;
use edumanage_core::dto::dashboard::{AdminDashboard, StudentDashboard, TeacherDashboard};

impl EduManageClient {
    /// Headline counts (admin)
    pub async fn admin_dashboard(&self) -> Result<AdminDashboard> {
        let response = self.client.get(self.url("/dashboard/admin")).send().await?;

        self.handle_response(response).await
    }

    /// Profile, today's lessons and classes (teacher)
    pub async fn teacher_dashboard(&self) -> Result<TeacherDashboard> {
        let response = self.client.get(self.url("/dashboard/guru")).send().await?;

        self.handle_response(response).await
    }

    /// Profile, today's lessons and graded years (student)
    pub async fn student_dashboard(&self) -> Result<StudentDashboard> {
        let response = self.client.get(self.url("/dashboard/siswa")).send().await?;

        self.handle_response(response).await
    }
}
