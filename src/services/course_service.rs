//! Course service layer.
//!
//! Business logic for listing and authoring courses.

use crate::domain::ValidationError;
use crate::error::ApiResult;
use crate::models::{Course, CoursePayload};
use crate::repositories::CourseRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Course service trait for business operations.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Every course on the platform.
    async fn list_courses(&self, force_refresh: bool) -> ApiResult<Vec<Course>>;

    /// Courses taught by one instructor.
    async fn instructor_courses(
        &self,
        instructor_id: &str,
        force_refresh: bool,
    ) -> ApiResult<Vec<Course>>;

    async fn create_course(
        &self,
        instructor_id: &str,
        title: &str,
        description: &str,
    ) -> ApiResult<Course>;

    async fn update_course(
        &self,
        course_id: &str,
        instructor_id: &str,
        title: &str,
        description: &str,
    ) -> ApiResult<()>;

    async fn delete_course(&self, course_id: &str) -> ApiResult<()>;

    async fn delete_material(&self, material_id: &str) -> ApiResult<()>;
}

/// Default implementation of CourseService.
pub struct CourseServiceImpl {
    courses: Arc<dyn CourseRepository>,
}

impl CourseServiceImpl {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    /// Validate the form and build the write payload.
    fn payload(
        instructor_id: &str,
        title: &str,
        description: &str,
    ) -> Result<CoursePayload, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("Title"));
        }
        if instructor_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("Instructor"));
        }
        Ok(CoursePayload {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            instructor_id: instructor_id.to_string(),
        })
    }
}

#[async_trait]
impl CourseService for CourseServiceImpl {
    async fn list_courses(&self, force_refresh: bool) -> ApiResult<Vec<Course>> {
        self.courses.list(force_refresh).await
    }

    async fn instructor_courses(
        &self,
        instructor_id: &str,
        force_refresh: bool,
    ) -> ApiResult<Vec<Course>> {
        let courses = self.courses.list(force_refresh).await?;
        Ok(courses
            .into_iter()
            .filter(|c| c.is_taught_by(instructor_id))
            .collect())
    }

    async fn create_course(
        &self,
        instructor_id: &str,
        title: &str,
        description: &str,
    ) -> ApiResult<Course> {
        let payload = Self::payload(instructor_id, title, description)?;
        self.courses.create(&payload).await
    }

    async fn update_course(
        &self,
        course_id: &str,
        instructor_id: &str,
        title: &str,
        description: &str,
    ) -> ApiResult<()> {
        if course_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("Course").into());
        }
        let payload = Self::payload(instructor_id, title, description)?;
        self.courses.update(course_id, &payload).await
    }

    async fn delete_course(&self, course_id: &str) -> ApiResult<()> {
        self.courses.delete(course_id).await
    }

    async fn delete_material(&self, material_id: &str) -> ApiResult<()> {
        self.courses.delete_material(material_id).await
    }
}
