//! Course model and its write payload.

use serde::{Deserialize, Serialize};

/// A course owned by an instructor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Course {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub course_id: String,

    pub title: String,

    pub description: String,

    #[serde(deserialize_with = "super::deserialize_id")]
    pub instructor_id: String,

    /// Link to externally stored media, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<CourseMaterial>,
}

impl Course {
    pub fn is_taught_by(&self, instructor_id: &str) -> bool {
        self.instructor_id == instructor_id
    }
}

/// A file attached to a course. Upload happens outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseMaterial {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub material_id: String,

    #[serde(deserialize_with = "super::deserialize_id")]
    pub course_id: String,

    pub file_name: String,

    pub file_url: String,

    pub file_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST Course` and `PUT Course/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
    pub instructor_id: String,
}
