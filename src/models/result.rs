//! Assessment attempt results.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One graded attempt at an assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AssessmentResult {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub result_id: String,

    #[serde(deserialize_with = "super::deserialize_id")]
    pub assessment_id: String,

    #[serde(deserialize_with = "super::deserialize_id")]
    pub user_id: String,

    pub score: u32,

    /// Timestamp as sent by the backend (RFC 3339, or without an offset)
    pub attempt_date: String,
}

impl AssessmentResult {
    /// Parse `attempt_date`; timestamps without an offset are taken as UTC.
    pub fn attempted_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.attempt_date) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.attempt_date, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Body of `POST Result/attempt`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSubmission {
    pub assessment_id: String,
    pub user_id: String,
    /// Chosen option index per question, in question order
    pub selected_answers: Vec<usize>,
}
