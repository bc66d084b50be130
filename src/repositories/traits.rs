use crate::error::ApiResult;
use crate::models::*;
use async_trait::async_trait;

/// Repository for managing courses.
///
/// Provides abstraction over course storage and retrieval,
/// enabling different implementations (API client, mock).
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Every course; served from the fetch cache unless `force_refresh`.
    async fn list(&self, force_refresh: bool) -> ApiResult<Vec<Course>>;

    /// Retrieve a single course by ID.
    async fn get(&self, id: &str) -> ApiResult<Course>;

    /// Create a new course.
    async fn create(&self, payload: &CoursePayload) -> ApiResult<Course>;

    /// Update an existing course.
    async fn update(&self, id: &str, payload: &CoursePayload) -> ApiResult<()>;

    /// Delete a course.
    async fn delete(&self, id: &str) -> ApiResult<()>;

    /// Delete one of a course's materials.
    async fn delete_material(&self, material_id: &str) -> ApiResult<()>;
}

/// Repository for managing assessments.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Every assessment; served from the fetch cache unless `force_refresh`.
    async fn list(&self, force_refresh: bool) -> ApiResult<Vec<Assessment>>;

    /// Retrieve a single assessment with its questions.
    async fn get(&self, id: &str) -> ApiResult<Assessment>;

    async fn create(&self, payload: &AssessmentPayload) -> ApiResult<Assessment>;

    async fn update(&self, id: &str, payload: &AssessmentPayload) -> ApiResult<()>;

    async fn delete(&self, id: &str) -> ApiResult<()>;

    /// Attempts recorded for a user.
    async fn history_for_user(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>>;
}

/// Repository for attempt results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Every result; served from the fetch cache unless `force_refresh`.
    async fn list(&self, force_refresh: bool) -> ApiResult<Vec<AssessmentResult>>;

    /// Submit answers for grading.
    async fn submit_attempt(&self, submission: &AttemptSubmission)
        -> ApiResult<AssessmentResult>;
}
