//! Student, teacher and user account endpoints

use crate::EduManageClient;
use crate::error::Result;
use edumanage_core::domain::student::Student;
use edumanage_core::domain::teacher::Teacher;
use edumanage_core::domain::user::UserView;
use edumanage_core::dto::page::Page;
use edumanage_core::dto::student::{CreateStudent, StudentProfile, StudentQuery};
use edumanage_core::dto::teacher::TeacherQuery;
use edumanage_core::dto::user::{CreateUser, UpdateUser, UserQuery};

impl EduManageClient {
    // =============================================================================
    // Students
    // =============================================================================

    /// One page of students matching a query
    ///
    /// # Arguments
    /// * `query` - Search text, class and gender filters
    /// * `page` - Page number, starting at 1
    pub async fn list_students(&self, query: &StudentQuery, page: u32) -> Result<Page<Student>> {
        let response = self
            .client
            .get(self.url("/api/students"))
            .query(query)
            .query(&[("page", page)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Distinct class labels
    pub async fn list_classes(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.url("/api/students/classes"))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a student by ID
    pub async fn get_student(&self, id: i64) -> Result<Student> {
        let response = self
            .client
            .get(self.url(&format!("/api/students/{}", id)))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a login account with a student profile
    pub async fn create_student(&self, req: &CreateStudent) -> Result<Student> {
        let response = self
            .client
            .post(self.url("/api/students"))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Replace a student's profile
    pub async fn update_student(&self, id: i64, profile: &StudentProfile) -> Result<Student> {
        let response = self
            .client
            .put(self.url(&format!("/api/students/{}", id)))
            .json(profile)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a student and its account
    pub async fn delete_student(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/students/{}", id)))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Teachers
    // =============================================================================

    /// List teachers matching a query
    pub async fn list_teachers(&self, query: &TeacherQuery) -> Result<Vec<Teacher>> {
        let response = self
            .client
            .get(self.url("/api/teachers"))
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a teacher and its account
    pub async fn delete_teacher(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/teachers/{}", id)))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // User Accounts
    // =============================================================================

    /// One page of user accounts matching a query
    pub async fn list_users(&self, query: &UserQuery, page: u32) -> Result<Page<UserView>> {
        let response = self
            .client
            .get(self.url("/api/users"))
            .query(query)
            .query(&[("page", page)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a user with its profile
    pub async fn get_user(&self, id: i64) -> Result<UserView> {
        let response = self
            .client
            .get(self.url(&format!("/api/users/{}", id)))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create an account and its role profile
    pub async fn create_user(&self, req: &CreateUser) -> Result<UserView> {
        let response = self
            .client
            .post(self.url("/api/users"))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Update an account and its role profile
    pub async fn update_user(&self, id: i64, req: &UpdateUser) -> Result<UserView> {
        let response = self
            .client
            .put(self.url(&format!("/api/users/{}", id)))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete an account; its profile and dependent records go with it
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/users/{}", id)))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
