use async_trait::async_trait;
use edusync_client::error::{ApiError, ApiResult};
use edusync_client::models::{
    Assessment, AssessmentPayload, AssessmentResult, AttemptSubmission, Course, CoursePayload,
};
use edusync_client::repositories::{AssessmentRepository, CourseRepository, ResultRepository};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CallCounter {
    counts: Mutex<HashMap<String, usize>>,
}

impl CallCounter {
    fn track(&self, method: &str) {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_insert(0) += 1;
    }

    fn get(&self, method: &str) -> usize {
        *self.counts.lock().unwrap().get(method).unwrap_or(&0)
    }
}

/// Mock course repository for testing.
///
/// Keeps courses in insertion order and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCourseRepository {
    courses: Arc<Mutex<Vec<Course>>>,
    calls: Arc<CallCounter>,
    last_payload: Arc<Mutex<Option<CoursePayload>>>,
}

#[allow(dead_code)]
impl MockCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&self, course: Course) {
        self.courses.lock().unwrap().push(course);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }

    /// Payload of the most recent create or update.
    pub fn last_payload(&self) -> Option<CoursePayload> {
        self.last_payload.lock().unwrap().clone()
    }
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn list(&self, _force_refresh: bool) -> ApiResult<Vec<Course>> {
        self.calls.track("list");
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> ApiResult<Course> {
        self.calls.track("get");
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.course_id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Course {} not found", id)))
    }

    async fn create(&self, payload: &CoursePayload) -> ApiResult<Course> {
        self.calls.track("create");
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        let mut courses = self.courses.lock().unwrap();
        let course = Course {
            course_id: format!("c-{}", courses.len() + 1),
            title: payload.title.clone(),
            description: payload.description.clone(),
            instructor_id: payload.instructor_id.clone(),
            ..Default::default()
        };
        courses.push(course.clone());
        Ok(course)
    }

    async fn update(&self, id: &str, payload: &CoursePayload) -> ApiResult<()> {
        self.calls.track("update");
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        let mut courses = self.courses.lock().unwrap();
        let course = courses
            .iter_mut()
            .find(|c| c.course_id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Course {} not found", id)))?;
        course.title = payload.title.clone();
        course.description = payload.description.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.calls.track("delete");
        self.courses.lock().unwrap().retain(|c| c.course_id != id);
        Ok(())
    }

    async fn delete_material(&self, material_id: &str) -> ApiResult<()> {
        self.calls.track("delete_material");
        for course in self.courses.lock().unwrap().iter_mut() {
            course.materials.retain(|m| m.material_id != material_id);
        }
        Ok(())
    }
}

/// Mock assessment repository for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockAssessmentRepository {
    assessments: Arc<Mutex<Vec<Assessment>>>,
    history: Arc<Mutex<Vec<AssessmentResult>>>,
    calls: Arc<CallCounter>,
    last_payload: Arc<Mutex<Option<AssessmentPayload>>>,
}

#[allow(dead_code)]
impl MockAssessmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_assessment(&self, assessment: Assessment) {
        self.assessments.lock().unwrap().push(assessment);
    }

    pub fn add_history(&self, result: AssessmentResult) {
        self.history.lock().unwrap().push(result);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }

    pub fn last_payload(&self) -> Option<AssessmentPayload> {
        self.last_payload.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssessmentRepository for MockAssessmentRepository {
    async fn list(&self, _force_refresh: bool) -> ApiResult<Vec<Assessment>> {
        self.calls.track("list");
        Ok(self.assessments.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> ApiResult<Assessment> {
        self.calls.track("get");
        self.assessments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.assessment_id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Assessment {} not found", id)))
    }

    async fn create(&self, payload: &AssessmentPayload) -> ApiResult<Assessment> {
        self.calls.track("create");
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        let mut assessments = self.assessments.lock().unwrap();
        let assessment = Assessment {
            assessment_id: format!("a-{}", assessments.len() + 1),
            course_id: payload.course_id.clone().unwrap_or_default(),
            title: payload.title.clone(),
            questions: payload.questions.clone(),
            max_score: payload.max_score,
        };
        assessments.push(assessment.clone());
        Ok(assessment)
    }

    async fn update(&self, id: &str, payload: &AssessmentPayload) -> ApiResult<()> {
        self.calls.track("update");
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        let mut assessments = self.assessments.lock().unwrap();
        let assessment = assessments
            .iter_mut()
            .find(|a| a.assessment_id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Assessment {} not found", id)))?;
        assessment.title = payload.title.clone();
        assessment.questions = payload.questions.clone();
        assessment.max_score = payload.max_score;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.calls.track("delete");
        self.assessments
            .lock()
            .unwrap()
            .retain(|a| a.assessment_id != id);
        Ok(())
    }

    async fn history_for_user(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>> {
        self.calls.track("history_for_user");
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Mock result repository that grades nothing: it returns `score` as set.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockResultRepository {
    results: Arc<Mutex<Vec<AssessmentResult>>>,
    submissions: Arc<Mutex<Vec<AttemptSubmission>>>,
    next_score: Arc<Mutex<u32>>,
    calls: Arc<CallCounter>,
}

#[allow(dead_code)]
impl MockResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&self, result: AssessmentResult) {
        self.results.lock().unwrap().push(result);
    }

    /// Score reported for the next submitted attempt.
    pub fn set_next_score(&self, score: u32) {
        *self.next_score.lock().unwrap() = score;
    }

    pub fn submissions(&self) -> Vec<AttemptSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }
}

#[async_trait]
impl ResultRepository for MockResultRepository {
    async fn list(&self, _force_refresh: bool) -> ApiResult<Vec<AssessmentResult>> {
        self.calls.track("list");
        Ok(self.results.lock().unwrap().clone())
    }

    async fn submit_attempt(
        &self,
        submission: &AttemptSubmission,
    ) -> ApiResult<AssessmentResult> {
        self.calls.track("submit_attempt");
        self.submissions.lock().unwrap().push(submission.clone());

        let mut results = self.results.lock().unwrap();
        let result = AssessmentResult {
            result_id: format!("r-{}", results.len() + 1),
            assessment_id: submission.assessment_id.clone(),
            user_id: submission.user_id.clone(),
            score: *self.next_score.lock().unwrap(),
            attempt_date: "2024-05-01T10:00:00Z".to_string(),
        };
        results.push(result.clone());
        Ok(result)
    }
}
