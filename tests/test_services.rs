//! Service-layer tests over in-memory repositories.

mod mocks;

use edusync_client::domain::ValidationError;
use edusync_client::error::ApiError;
use edusync_client::models::{Assessment, AssessmentResult, Course, Question};
use edusync_client::services::{
    AnalyticsService, AnalyticsServiceImpl, AssessmentDraft, AssessmentService,
    AssessmentServiceImpl, CourseService, CourseServiceImpl,
};
use mocks::{MockAssessmentRepository, MockCourseRepository, MockResultRepository};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

fn course(id: &str, title: &str, instructor: &str) -> Course {
    Course {
        course_id: id.to_string(),
        title: title.to_string(),
        instructor_id: instructor.to_string(),
        ..Default::default()
    }
}

fn questions_json(count: usize) -> String {
    let questions: Vec<_> = (0..count)
        .map(|i| json!({ "question": format!("Q{}", i + 1), "options": ["a", "b", "c"], "correctIndex": 0 }))
        .collect();
    json!(questions).to_string()
}

fn assessment(id: &str, course_id: &str, title: &str, question_count: usize) -> Assessment {
    Assessment {
        assessment_id: id.to_string(),
        course_id: course_id.to_string(),
        title: title.to_string(),
        questions: questions_json(question_count),
        max_score: question_count as u32,
    }
}

fn result(id: &str, assessment_id: &str, user_id: &str, score: u32, date: &str) -> AssessmentResult {
    AssessmentResult {
        result_id: id.to_string(),
        assessment_id: assessment_id.to_string(),
        user_id: user_id.to_string(),
        score,
        attempt_date: date.to_string(),
    }
}

// ========================= Courses =========================

#[tokio::test]
async fn test_instructor_courses_filters_by_owner() {
    let repo = MockCourseRepository::new();
    repo.add_course(course("c-1", "Rust 101", "i-1"));
    repo.add_course(course("c-2", "Go 101", "i-2"));
    repo.add_course(course("c-3", "Async Rust", "i-1"));
    let service = CourseServiceImpl::new(Arc::new(repo.clone()));

    let mine = service.instructor_courses("i-1", false).await.unwrap();
    let ids: Vec<_> = mine.iter().map(|c| c.course_id.as_str()).collect();
    assert_eq!(ids, vec!["c-1", "c-3"]);

    let all = service.list_courses(false).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(repo.get_call_count("list"), 2);
}

#[tokio::test]
async fn test_create_course_rejects_blank_title() {
    let repo = MockCourseRepository::new();
    let service = CourseServiceImpl::new(Arc::new(repo.clone()));

    let err = service.create_course("i-1", "  ", "desc").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::EmptyField("Title"))
    ));
    assert_eq!(repo.get_call_count("create"), 0);
}

#[tokio::test]
async fn test_update_course_sends_trimmed_payload() {
    let repo = MockCourseRepository::new();
    repo.add_course(course("c-1", "Rust 101", "i-1"));
    let service = CourseServiceImpl::new(Arc::new(repo.clone()));

    service
        .update_course("c-1", "i-1", " Rust 102 ", "Traits")
        .await
        .unwrap();

    let payload = repo.last_payload().unwrap();
    assert_eq!(payload.title, "Rust 102");
    assert_eq!(payload.instructor_id, "i-1");
}

// ========================= Assessments =========================

fn draft(course_id: &str, questions: Vec<Question>) -> AssessmentDraft {
    AssessmentDraft {
        course_id: course_id.to_string(),
        title: "Week 1".to_string(),
        questions,
    }
}

fn question(correct: usize) -> Question {
    Question {
        question: "Pick one".to_string(),
        options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        correct_index: correct,
    }
}

#[tokio::test]
async fn test_create_assessment_sets_max_score() {
    let assessments = MockAssessmentRepository::new();
    let service =
        AssessmentServiceImpl::new(Arc::new(assessments.clone()), Arc::new(MockResultRepository::new()));

    let created = service
        .create(&draft("c-1", vec![question(0), question(2), question(1)]))
        .await
        .unwrap();

    assert_eq!(created.max_score, 3);
    assert_eq!(created.question_count(), 3);
    let payload = assessments.last_payload().unwrap();
    assert_eq!(payload.course_id.as_deref(), Some("c-1"));
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_repository() {
    let assessments = MockAssessmentRepository::new();
    let service =
        AssessmentServiceImpl::new(Arc::new(assessments.clone()), Arc::new(MockResultRepository::new()));

    let err = service
        .create(&draft("c-1", vec![question(0), question(5)]))
        .await
        .unwrap_err();

    match err {
        ApiError::Validation(e) => assert!(e.to_string().starts_with("Question 2:")),
        other => panic!("Expected validation error, got: {:?}", other),
    }
    assert_eq!(assessments.get_call_count("create"), 0);
}

#[tokio::test]
async fn test_update_assessment_omits_course() {
    let assessments = MockAssessmentRepository::new();
    assessments.add_assessment(assessment("a-1", "c-1", "Old", 1));
    let service =
        AssessmentServiceImpl::new(Arc::new(assessments.clone()), Arc::new(MockResultRepository::new()));

    service
        .update("a-1", &draft("c-1", vec![question(1), question(1)]))
        .await
        .unwrap();

    let payload = assessments.last_payload().unwrap();
    assert!(payload.course_id.is_none());
    assert_eq!(payload.max_score, 2);
}

#[tokio::test]
async fn test_list_for_courses() {
    let assessments = MockAssessmentRepository::new();
    assessments.add_assessment(assessment("a-1", "c-1", "Quiz 1", 2));
    assessments.add_assessment(assessment("a-2", "c-2", "Quiz 2", 2));
    assessments.add_assessment(assessment("a-3", "c-3", "Quiz 3", 2));
    let service =
        AssessmentServiceImpl::new(Arc::new(assessments), Arc::new(MockResultRepository::new()));

    let listed = service
        .list_for_courses(&["c-1".to_string(), "c-3".to_string()], false)
        .await
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|a| a.assessment_id.as_str()).collect();
    assert_eq!(ids, vec!["a-1", "a-3"]);
}

#[tokio::test]
async fn test_submit_attempt_orders_answers_by_question() {
    let results = MockResultRepository::new();
    results.set_next_score(2);
    let service =
        AssessmentServiceImpl::new(Arc::new(MockAssessmentRepository::new()), Arc::new(results.clone()));

    let quiz = assessment("a-1", "c-1", "Quiz", 3);
    let mut answers = BTreeMap::new();
    answers.insert(2, 1);
    answers.insert(0, 0);
    answers.insert(1, 2);

    let outcome = service.submit_attempt("u-1", &quiz, &answers).await.unwrap();

    assert_eq!(results.submissions()[0].selected_answers, vec![0, 2, 1]);
    assert_eq!(outcome.result.score, 2);
    assert_eq!(outcome.max_score, 3);
    assert_eq!(outcome.percentage, 67);
}

#[tokio::test]
async fn test_submit_attempt_rejects_unknown_option() {
    let results = MockResultRepository::new();
    let service =
        AssessmentServiceImpl::new(Arc::new(MockAssessmentRepository::new()), Arc::new(results.clone()));

    let quiz = assessment("a-1", "c-1", "Quiz", 1);
    let answers = BTreeMap::from([(0, 3)]);

    let err = service.submit_attempt("u-1", &quiz, &answers).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert_eq!(results.get_call_count("submit_attempt"), 0);
}

#[tokio::test]
async fn test_history_for_user() {
    let assessments = MockAssessmentRepository::new();
    assessments.add_history(result("r-1", "a-1", "u-1", 1, "2024-01-01T00:00:00Z"));
    assessments.add_history(result("r-2", "a-1", "u-2", 1, "2024-01-01T00:00:00Z"));
    let service =
        AssessmentServiceImpl::new(Arc::new(assessments), Arc::new(MockResultRepository::new()));

    let history = service.history("u-1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result_id, "r-1");
}

// ========================= Analytics =========================

fn analytics_fixture() -> AnalyticsServiceImpl {
    let courses = MockCourseRepository::new();
    courses.add_course(course("c-1", "Rust 101", "i-1"));
    courses.add_course(course("c-2", "Go 101", "i-2"));

    let assessments = MockAssessmentRepository::new();
    assessments.add_assessment(assessment("a-1", "c-1", "Ownership quiz", 3));
    assessments.add_assessment(assessment("a-2", "c-1", "Unattempted", 2));
    assessments.add_assessment(assessment("a-3", "c-2", "Goroutines", 4));

    let results = MockResultRepository::new();
    results.add_result(result("r-1", "a-1", "u-1", 3, "2024-03-01T09:00:00Z"));
    results.add_result(result("r-2", "a-1", "u-2", 1, "2024-03-02T09:00:00Z"));
    results.add_result(result("r-3", "a-1", "u-3", 2, "2024-03-03T09:00:00Z"));
    results.add_result(result("r-4", "a-3", "u-1", 4, "2024-03-05T09:00:00"));
    results.add_result(result("r-5", "a-9", "u-1", 1, "2024-02-01T09:00:00Z"));

    AnalyticsServiceImpl::new(Arc::new(courses), Arc::new(assessments), Arc::new(results))
}

#[tokio::test]
async fn test_instructor_analytics() {
    let service = analytics_fixture();

    let analytics = service.instructor_analytics("i-1", false).await.unwrap();

    assert_eq!(analytics.course_count, 1);
    assert_eq!(analytics.assessment_count, 2);
    assert_eq!(analytics.total_attempts, 3);
    assert_eq!(analytics.assessments.len(), 1);

    let stats = &analytics.assessments[0];
    assert_eq!(stats.assessment_id, "a-1");
    assert_eq!(stats.course_title, "Rust 101");
    assert_eq!(stats.total_attempts, 3);
    assert_eq!(stats.avg_score, 2.0);
    assert_eq!(stats.max_score, 3);
    assert_eq!(stats.avg_percentage, 67);
}

#[tokio::test]
async fn test_student_progress_newest_first() {
    let service = analytics_fixture();

    let history = service.student_progress("u-1", false).await.unwrap();
    let ids: Vec<_> = history.iter().map(|e| e.attempt_id.as_str()).collect();
    assert_eq!(ids, vec!["r-4", "r-1", "r-5"]);

    assert_eq!(history[0].course_title, "Go 101");
    assert_eq!(history[0].percentage, 100);

    // result for an assessment that no longer exists
    assert_eq!(history[2].assessment_title, "Unknown Assessment");
    assert_eq!(history[2].course_title, "Unknown Course");
    assert_eq!(history[2].max_score, 0);
    assert_eq!(history[2].percentage, 0);
}

#[tokio::test]
async fn test_completed_assessment_ids() {
    let service = analytics_fixture();

    let done = service.completed_assessment_ids("u-1").await.unwrap();
    assert_eq!(done.len(), 3);
    assert!(done.contains("a-1"));
    assert!(!done.contains("a-2"));
}
