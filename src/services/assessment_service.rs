//! Assessment service layer.
//!
//! Authoring rules for assessments and the student attempt flow.

use crate::domain::ValidationError;
use crate::error::{ApiError, ApiResult};
use crate::models::{Assessment, AssessmentPayload, AssessmentResult, AttemptSubmission, Question};
use crate::repositories::{AssessmentRepository, ResultRepository};
use crate::services::analytics_service::percentage;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// An assessment as edited by an instructor, before encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentDraft {
    pub course_id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

/// A graded attempt together with the figures shown to the student.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub result: AssessmentResult,
    pub max_score: usize,
    pub percentage: u32,
}

/// Check a draft and encode it into the backend payload.
///
/// Title and course are required, there must be at least one question, every
/// question and option must be filled in and `correct_index` must point at an
/// option. `max_score` becomes the number of questions.
pub fn validate_draft(draft: &AssessmentDraft) -> Result<AssessmentPayload, ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::EmptyField("Title"));
    }
    if draft.course_id.trim().is_empty() {
        return Err(ValidationError::EmptyField("Course"));
    }
    if draft.questions.is_empty() {
        return Err(ValidationError::EmptyField("Questions"));
    }

    for (index, q) in draft.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            return Err(ValidationError::InvalidQuestion {
                index,
                reason: "question text is required".to_string(),
            });
        }
        if q.options.iter().any(|o| o.trim().is_empty()) {
            return Err(ValidationError::InvalidQuestion {
                index,
                reason: "all options are required".to_string(),
            });
        }
        if q.correct_index >= q.options.len() {
            return Err(ValidationError::InvalidQuestion {
                index,
                reason: format!("correct answer {} is not an option", q.correct_index + 1),
            });
        }
    }

    let questions = serde_json::to_string(&draft.questions).map_err(|e| {
        ValidationError::InvalidQuestion {
            index: 0,
            reason: e.to_string(),
        }
    })?;

    Ok(AssessmentPayload {
        title: draft.title.trim().to_string(),
        questions,
        max_score: draft.questions.len() as u32,
        course_id: Some(draft.course_id.clone()),
    })
}

/// Assessments present in `current` but not in `previous`.
///
/// An empty `previous` means nothing was loaded yet, so nothing counts as new.
pub fn find_new_assessments(previous: &[Assessment], current: &[Assessment]) -> Vec<Assessment> {
    if previous.is_empty() {
        return Vec::new();
    }
    let seen: HashSet<&str> = previous.iter().map(|a| a.assessment_id.as_str()).collect();
    current
        .iter()
        .filter(|a| !seen.contains(a.assessment_id.as_str()))
        .cloned()
        .collect()
}

/// Assessment service trait for business operations.
#[async_trait]
pub trait AssessmentService: Send + Sync {
    /// Assessments that belong to any of `course_ids`.
    async fn list_for_courses(
        &self,
        course_ids: &[String],
        force_refresh: bool,
    ) -> ApiResult<Vec<Assessment>>;

    /// Load an assessment, questions included, for taking or editing.
    async fn load(&self, assessment_id: &str) -> ApiResult<Assessment>;

    async fn create(&self, draft: &AssessmentDraft) -> ApiResult<Assessment>;

    async fn update(&self, assessment_id: &str, draft: &AssessmentDraft) -> ApiResult<()>;

    async fn delete(&self, assessment_id: &str) -> ApiResult<()>;

    /// Submit a student's answers, keyed by question index.
    ///
    /// Unanswered questions are simply left out.
    async fn submit_attempt(
        &self,
        user_id: &str,
        assessment: &Assessment,
        answers: &BTreeMap<usize, usize>,
    ) -> ApiResult<AttemptOutcome>;

    /// Attempts the backend recorded for a user.
    async fn history(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>>;
}

/// Default implementation of AssessmentService.
pub struct AssessmentServiceImpl {
    assessments: Arc<dyn AssessmentRepository>,
    results: Arc<dyn ResultRepository>,
}

impl AssessmentServiceImpl {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            assessments,
            results,
        }
    }
}

#[async_trait]
impl AssessmentService for AssessmentServiceImpl {
    async fn list_for_courses(
        &self,
        course_ids: &[String],
        force_refresh: bool,
    ) -> ApiResult<Vec<Assessment>> {
        let all = self.assessments.list(force_refresh).await?;
        Ok(all
            .into_iter()
            .filter(|a| course_ids.iter().any(|id| *id == a.course_id))
            .collect())
    }

    async fn load(&self, assessment_id: &str) -> ApiResult<Assessment> {
        self.assessments.get(assessment_id).await
    }

    async fn create(&self, draft: &AssessmentDraft) -> ApiResult<Assessment> {
        let payload = validate_draft(draft)?;
        self.assessments.create(&payload).await
    }

    async fn update(&self, assessment_id: &str, draft: &AssessmentDraft) -> ApiResult<()> {
        let mut payload = validate_draft(draft)?;
        // the course of an existing assessment is not changed
        payload.course_id = None;
        self.assessments.update(assessment_id, &payload).await
    }

    async fn delete(&self, assessment_id: &str) -> ApiResult<()> {
        self.assessments.delete(assessment_id).await
    }

    async fn submit_attempt(
        &self,
        user_id: &str,
        assessment: &Assessment,
        answers: &BTreeMap<usize, usize>,
    ) -> ApiResult<AttemptOutcome> {
        let questions = assessment.parse_questions().map_err(|e| {
            ApiError::MalformedResponse(format!(
                "questions of assessment {}: {}",
                assessment.assessment_id, e
            ))
        })?;

        for (&question, &option) in answers {
            let q = questions.get(question).ok_or_else(|| {
                ApiError::InvalidRequest(format!("question {} does not exist", question + 1))
            })?;
            if option >= q.options.len() {
                return Err(ApiError::InvalidRequest(format!(
                    "question {} has no option {}",
                    question + 1,
                    option + 1
                )));
            }
        }

        let submission = AttemptSubmission {
            assessment_id: assessment.assessment_id.clone(),
            user_id: user_id.to_string(),
            selected_answers: answers.values().copied().collect(),
        };
        let result = self.results.submit_attempt(&submission).await?;

        let max_score = questions.len();
        Ok(AttemptOutcome {
            percentage: percentage(result.score as f64, max_score),
            max_score,
            result,
        })
    }

    async fn history(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>> {
        self.assessments.history_for_user(user_id).await
    }
}
