//! Assessment model.
//!
//! The backend stores an assessment's questions as a JSON-encoded string; the
//! helpers here decode it into [`Question`] values.

use serde::{Deserialize, Serialize};

/// Number of answer options given to a freshly created question.
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// A multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    /// A blank question with the default number of empty options.
    pub fn blank() -> Self {
        Self {
            question: String::new(),
            options: vec![String::new(); DEFAULT_OPTION_COUNT],
            correct_index: 0,
        }
    }
}

/// An assessment attached to a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Assessment {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub assessment_id: String,

    #[serde(deserialize_with = "super::deserialize_id")]
    pub course_id: String,

    pub title: String,

    /// JSON array of questions, encoded as a string
    pub questions: String,

    pub max_score: u32,
}

impl Assessment {
    /// Decode the question list.
    pub fn parse_questions(&self) -> Result<Vec<Question>, serde_json::Error> {
        serde_json::from_str(&self.questions)
    }

    /// Decode the question list for editing.
    ///
    /// Older assessments stored a single free-text question; such text becomes
    /// one question with blank options. An empty field yields one blank question.
    pub fn questions_for_editing(&self) -> Vec<Question> {
        if self.questions.trim().is_empty() {
            return vec![Question::blank()];
        }
        match self.parse_questions() {
            Ok(questions) => questions,
            Err(_) => vec![Question {
                question: self.questions.clone(),
                ..Question::blank()
            }],
        }
    }

    /// Number of questions, which is also the highest attainable score.
    ///
    /// Unparseable or empty question data counts as zero.
    pub fn question_count(&self) -> usize {
        if self.questions.trim().is_empty() {
            return 0;
        }
        self.parse_questions().map(|q| q.len()).unwrap_or(0)
    }
}

/// Body of `POST Assessment` and `PUT Assessment/{id}`.
///
/// `course_id` is only sent on creation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AssessmentPayload {
    pub title: String,
    pub questions: String,
    pub max_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}
