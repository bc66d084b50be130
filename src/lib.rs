//! EduSync client - a typed Rust client for the EduSync learning platform.
//!
//! The crate wraps the EduSync REST backend: authentication, courses,
//! assessments, attempts and analytics for students and instructors.
//! Collection reads are memoized per endpoint for a short window by the
//! [`FetchCache`].
//!
//! # Architecture
//!
//! - **cache**: Per-endpoint fetch cache with a fixed freshness window
//! - **client**: HTTP client for the EduSync API and its async wrapper
//! - **config**: Configuration management from environment variables
//! - **context**: Wiring of everything below into one [`EduSync`] value
//! - **domain**: Validated value types (email, password, endpoint key, role)
//! - **error**: Custom error types for precise error handling
//! - **logging**: Tracing subscriber setup
//! - **metrics**: Request and cache counters
//! - **models**: Records exchanged with the backend
//! - **repositories**: Data access over the client and the cache
//! - **services**: Validation and business rules
//! - **session**: Bearer token storage
//!
//! # Example
//!
//! ```no_run
//! use edusync_client::{Config, EduSync};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! edusync_client::logging::init(&config);
//!
//! let edusync = EduSync::from_config(&config);
//! edusync.auth.login("asha@example.com", "correct horse").await?;
//! let courses = edusync.courses.list_courses(false).await?;
//! println!("{} courses", courses.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod services;
pub mod session;

pub use cache::{FetchCache, ResourceSource};
pub use client::{AsyncEduSyncClient, AsyncEduSyncClientImpl, EduSyncClient};
pub use config::Config;
pub use context::EduSync;
pub use domain::{EmailAddress, EndpointKey, NewPassword, Role, ValidationError};
pub use error::{ApiError, ApiResult, ConfigError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{
    Assessment, AssessmentPayload, AssessmentResult, AttemptSubmission, AuthSession, Course,
    CourseMaterial, CoursePayload, Question,
};
