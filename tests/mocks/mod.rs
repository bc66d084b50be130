//! In-memory test doubles shared by the integration tests.

mod mock_repositories;
mod mock_resource_source;

#[allow(unused_imports)]
pub use mock_repositories::{MockAssessmentRepository, MockCourseRepository, MockResultRepository};
#[allow(unused_imports)]
pub use mock_resource_source::MockResourceSource;
