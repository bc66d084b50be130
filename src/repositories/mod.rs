//! Data access for courses, assessments and results.
//!
//! Collection reads go through the shared [`FetchCache`](crate::cache::FetchCache);
//! every write invalidates the key of the collection it touched.

mod api_assessment_repository;
mod api_course_repository;
mod api_result_repository;
mod traits;

pub use api_assessment_repository::ApiAssessmentRepository;
pub use api_course_repository::ApiCourseRepository;
pub use api_result_repository::ApiResultRepository;
pub use traits::{AssessmentRepository, CourseRepository, ResultRepository};

/// Fetch cache keys, which double as collection paths.
pub mod keys {
    pub const COURSE: &str = "Course";
    pub const ASSESSMENT: &str = "Assessment";
    pub const RESULT: &str = "Result";
}
