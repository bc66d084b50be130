//! Analytics over courses, assessments and results.
//!
//! The aggregation functions are pure so they can be checked without a
//! backend; [`AnalyticsServiceImpl`] only gathers the three collections.

use crate::error::ApiResult;
use crate::models::{Assessment, AssessmentResult, Course};
use crate::repositories::{AssessmentRepository, CourseRepository, ResultRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

pub const UNKNOWN_ASSESSMENT: &str = "Unknown Assessment";
pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// `score` out of `max` as a rounded whole percentage, 0 when `max` is 0.
pub fn percentage(score: f64, max: usize) -> u32 {
    if max == 0 {
        return 0;
    }
    (score / max as f64 * 100.0).round().max(0.0) as u32
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregated attempts for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStats {
    pub assessment_id: String,
    pub title: String,
    pub course_title: String,
    pub total_attempts: usize,
    /// Mean score, one decimal
    pub avg_score: f64,
    pub max_score: usize,
    pub avg_percentage: u32,
}

/// Dashboard figures for an instructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorAnalytics {
    pub course_count: usize,
    pub assessment_count: usize,
    pub total_attempts: usize,
    pub assessments: Vec<AssessmentStats>,
}

/// One attempt in a student's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub attempt_id: String,
    pub assessment_id: String,
    pub assessment_title: String,
    pub course_title: String,
    pub score: u32,
    pub max_score: usize,
    pub percentage: u32,
    pub attempt_date: Option<DateTime<Utc>>,
}

/// Per-assessment statistics for the courses taught by `instructor_id`.
///
/// Assessments nobody attempted are left out. The result follows the order
/// of `assessments`.
pub fn compute_assessment_stats(
    instructor_id: &str,
    courses: &[Course],
    assessments: &[Assessment],
    results: &[AssessmentResult],
) -> InstructorAnalytics {
    let own_courses: HashMap<&str, &Course> = courses
        .iter()
        .filter(|c| c.is_taught_by(instructor_id))
        .map(|c| (c.course_id.as_str(), c))
        .collect();

    let own_assessments: Vec<&Assessment> = assessments
        .iter()
        .filter(|a| own_courses.contains_key(a.course_id.as_str()))
        .collect();

    let mut by_assessment: HashMap<&str, Vec<&AssessmentResult>> = HashMap::new();
    for result in results {
        by_assessment
            .entry(result.assessment_id.as_str())
            .or_default()
            .push(result);
    }

    let mut stats = Vec::new();
    let mut total_attempts = 0;
    for assessment in &own_assessments {
        let attempts = match by_assessment.get(assessment.assessment_id.as_str()) {
            Some(attempts) if !attempts.is_empty() => attempts,
            _ => continue,
        };

        let sum: u64 = attempts.iter().map(|r| u64::from(r.score)).sum();
        let avg = sum as f64 / attempts.len() as f64;
        let max_score = assessment.question_count();
        total_attempts += attempts.len();

        stats.push(AssessmentStats {
            assessment_id: assessment.assessment_id.clone(),
            title: assessment.title.clone(),
            course_title: own_courses
                .get(assessment.course_id.as_str())
                .map(|c| c.title.clone())
                .unwrap_or_else(|| UNKNOWN_COURSE.to_string()),
            total_attempts: attempts.len(),
            avg_score: round_one_decimal(avg),
            max_score,
            avg_percentage: percentage(avg, max_score),
        });
    }

    InstructorAnalytics {
        course_count: own_courses.len(),
        assessment_count: own_assessments.len(),
        total_attempts,
        assessments: stats,
    }
}

/// Attempts made by `user_id`, newest first.
///
/// Attempts whose date cannot be parsed sort last.
pub fn build_progress_history(
    user_id: &str,
    courses: &[Course],
    assessments: &[Assessment],
    results: &[AssessmentResult],
) -> Vec<ProgressEntry> {
    let assessments: HashMap<&str, &Assessment> = assessments
        .iter()
        .map(|a| (a.assessment_id.as_str(), a))
        .collect();
    let course_titles: HashMap<&str, &str> = courses
        .iter()
        .map(|c| (c.course_id.as_str(), c.title.as_str()))
        .collect();

    let mut history: Vec<ProgressEntry> = results
        .iter()
        .filter(|r| r.user_id == user_id)
        .map(|r| {
            let assessment = assessments.get(r.assessment_id.as_str());
            let max_score = assessment.map(|a| a.question_count()).unwrap_or(0);
            let course_title = assessment
                .and_then(|a| course_titles.get(a.course_id.as_str()))
                .map(|t| t.to_string())
                .unwrap_or_else(|| UNKNOWN_COURSE.to_string());

            ProgressEntry {
                attempt_id: r.result_id.clone(),
                assessment_id: r.assessment_id.clone(),
                assessment_title: assessment
                    .map(|a| a.title.clone())
                    .unwrap_or_else(|| UNKNOWN_ASSESSMENT.to_string()),
                course_title,
                score: r.score,
                max_score,
                percentage: percentage(f64::from(r.score), max_score),
                attempt_date: r.attempted_at(),
            }
        })
        .collect();

    // None < Some, so reversing the comparison puts undated attempts last
    history.sort_by(|a, b| b.attempt_date.cmp(&a.attempt_date));
    history
}

/// Analytics service trait.
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    async fn instructor_analytics(
        &self,
        instructor_id: &str,
        force_refresh: bool,
    ) -> ApiResult<InstructorAnalytics>;

    async fn student_progress(
        &self,
        user_id: &str,
        force_refresh: bool,
    ) -> ApiResult<Vec<ProgressEntry>>;

    /// Distinct assessments a student has attempted.
    async fn completed_assessment_ids(&self, user_id: &str) -> ApiResult<HashSet<String>>;
}

/// Default implementation of AnalyticsService.
pub struct AnalyticsServiceImpl {
    courses: Arc<dyn CourseRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    results: Arc<dyn ResultRepository>,
}

impl AnalyticsServiceImpl {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            courses,
            assessments,
            results,
        }
    }

    async fn load_all(
        &self,
        force_refresh: bool,
    ) -> ApiResult<(Vec<Course>, Vec<Assessment>, Vec<AssessmentResult>)> {
        futures::try_join!(
            self.courses.list(force_refresh),
            self.assessments.list(force_refresh),
            self.results.list(force_refresh),
        )
    }
}

#[async_trait]
impl AnalyticsService for AnalyticsServiceImpl {
    async fn instructor_analytics(
        &self,
        instructor_id: &str,
        force_refresh: bool,
    ) -> ApiResult<InstructorAnalytics> {
        let (courses, assessments, results) = self.load_all(force_refresh).await?;
        let analytics = compute_assessment_stats(instructor_id, &courses, &assessments, &results);
        debug!(
            instructor_id,
            assessments = analytics.assessments.len(),
            attempts = analytics.total_attempts,
            "computed instructor analytics"
        );
        Ok(analytics)
    }

    async fn student_progress(
        &self,
        user_id: &str,
        force_refresh: bool,
    ) -> ApiResult<Vec<ProgressEntry>> {
        let (courses, assessments, results) = self.load_all(force_refresh).await?;
        Ok(build_progress_history(user_id, &courses, &assessments, &results))
    }

    async fn completed_assessment_ids(&self, user_id: &str) -> ApiResult<HashSet<String>> {
        let results = self.results.list(false).await?;
        Ok(results
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.assessment_id)
            .collect())
    }
}
