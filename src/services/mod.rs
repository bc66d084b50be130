//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories. They validate user input before anything is sent to the
//! backend and reshape responses for display.

mod analytics_service;
mod assessment_service;
mod auth_service;
mod course_service;

pub use analytics_service::{
    build_progress_history, compute_assessment_stats, percentage, AnalyticsService,
    AnalyticsServiceImpl, AssessmentStats, InstructorAnalytics, ProgressEntry,
    UNKNOWN_ASSESSMENT, UNKNOWN_COURSE,
};
pub use assessment_service::{
    find_new_assessments, validate_draft, AssessmentDraft, AssessmentService,
    AssessmentServiceImpl, AttemptOutcome,
};
pub use auth_service::{authorize, AuthService, AuthServiceImpl, RegistrationForm};
pub use course_service::{CourseService, CourseServiceImpl};
