//! Data models for EduSync entities.
//!
//! This module contains the records exchanged with the backend: sessions,
//! courses, assessments and attempt results, plus the request payloads used
//! to create or change them.

pub mod assessment;
pub mod course;
pub mod result;
pub mod user;

pub use assessment::{Assessment, AssessmentPayload, Question};
pub use course::{Course, CourseMaterial, CoursePayload};
pub use result::{AssessmentResult, AttemptSubmission};
pub use user::{AuthSession, LoginRequest, RegisterRequest, ResetPasswordRequest};

use serde::{Deserialize, Deserializer};

/// Accept identifiers sent either as strings (GUIDs) or as plain numbers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
        Null(()),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
        RawId::Null(()) => String::new(),
    })
}
