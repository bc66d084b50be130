//! HTTP client for the EduSync backend API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client attaches the bearer token, maps
//! HTTP failures onto [`ApiError`] and decodes JSON bodies into the models.

mod async_wrapper;
pub use async_wrapper::{AsyncEduSyncClient, AsyncEduSyncClientImpl};

use crate::config::Config;
use crate::domain::EndpointKey;
use crate::error::{ApiError, ApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{
    Assessment, AssessmentPayload, AssessmentResult, AttemptSubmission, AuthSession, Course,
    CoursePayload, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::session::{MemoryTokenStore, TokenStore};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the EduSync API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct EduSyncClient {
    /// Base URL for the API, e.g. `https://host/api`
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Source of the bearer token
    tokens: Arc<dyn TokenStore>,

    /// Metrics collector
    metrics: Metrics,
}

impl EduSyncClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            agent: Arc::new(agent),
            tokens,
            metrics: Metrics::new(),
        }
    }

    /// Create a client with a custom base URL and an empty in-memory token store
    /// (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::new(
            &Config::with_base_url(base_url),
            Arc::new(MemoryTokenStore::new()),
        )
    }

    /// Report into an existing collector instead of a private one.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The token store consulted on every request.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Apply the headers every request carries.
    fn prepare(&self, request: ureq::Request) -> ureq::Request {
        let request = request.set("Content-Type", "application/json");
        match self.tokens.get() {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Send a prepared request, timing it and mapping failures.
    fn dispatch(
        &self,
        method: &str,
        request: ureq::Request,
        body: Option<&Value>,
    ) -> ApiResult<ureq::Response> {
        let url = request.url().to_string();
        let timer = HttpTimer::new(self.metrics.clone());
        tracing::debug!("{} {}", method, url);

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                timer.complete_with_error();
                let err = self.map_error(e);
                tracing::error!("{} {} - Error: {}", method, url, err);
                Err(err)
            }
        }
    }

    /// Execute a GET request.
    fn get(&self, path: &str) -> ApiResult<ureq::Response> {
        let request = self.prepare(self.agent.get(&self.build_url(path)));
        self.dispatch("GET", request, None)
    }

    /// Execute a POST request with a JSON body.
    fn post(&self, path: &str, body: &Value) -> ApiResult<ureq::Response> {
        let request = self.prepare(self.agent.post(&self.build_url(path)));
        self.dispatch("POST", request, Some(body))
    }

    /// Execute a PUT request with a JSON body.
    fn put(&self, path: &str, body: &Value) -> ApiResult<ureq::Response> {
        let request = self.prepare(self.agent.put(&self.build_url(path)));
        self.dispatch("PUT", request, Some(body))
    }

    /// Execute a DELETE request.
    fn delete(&self, path: &str) -> ApiResult<ureq::Response> {
        let request = self.prepare(self.agent.delete(&self.build_url(path)));
        self.dispatch("DELETE", request, None)
    }

    /// Map a ureq error to an ApiError.
    ///
    /// A 401 also drops the stored token: the session is over.
    fn map_error(&self, error: ureq::Error) -> ApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => {
                        tracing::warn!("Session expired or invalid, clearing stored token");
                        self.tokens.clear();
                        ApiError::Unauthorized
                    }
                    404 => ApiError::NotFound(message),
                    _ => ApiError::Status {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed | ureq::ErrorKind::Dns => ApiError::Network(
                    "Unable to connect to the server. Please check if the server is running."
                        .to_string(),
                ),
                ureq::ErrorKind::Io => ApiError::Timeout,
                _ => ApiError::Network(transport.to_string()),
            },
        }
    }

    /// Read a body and decode it as `T`.
    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(ApiError::Json)
    }

    /// Read an acknowledgement body that may be JSON, plain text or empty.
    fn read_ack(response: ureq::Response) -> ApiResult<Value> {
        let body = response
            .into_string()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    fn to_body<T: serde::Serialize>(payload: &T) -> ApiResult<Value> {
        serde_json::to_value(payload).map_err(ApiError::Json)
    }

    /// `{collection}/{id}` with the id percent-encoded.
    fn item_path(collection: &str, id: &str) -> String {
        format!("{}/{}", collection, urlencoding::encode(id))
    }

    // ========================= Generic Collection Read =========================

    /// GET an endpoint key and return the raw JSON body.
    ///
    /// Sends `Cache-Control: no-cache` and `Pragma: no-cache` so intermediaries
    /// never answer for the fetch cache.
    pub fn get_resource(&self, key: &EndpointKey) -> ApiResult<Value> {
        let request = self
            .prepare(self.agent.get(&self.build_url(key.as_str())))
            .set("Cache-Control", "no-cache")
            .set("Pragma", "no-cache");
        let response = self.dispatch("GET", request, None)?;
        Self::read_json(response)
    }

    // ========================= Auth Operations =========================

    /// Exchange credentials for a session.
    pub fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession> {
        tracing::info!("Logging in as {}", request.email);
        let response = self.post("/auth/login", &Self::to_body(request)?)?;
        Self::read_json(response)
    }

    /// Create an account.
    pub fn register(&self, request: &RegisterRequest) -> ApiResult<Value> {
        tracing::info!("Registering {} as {}", request.email, request.role);
        let response = self.post("/auth/register", &Self::to_body(request)?)?;
        Self::read_ack(response)
    }

    /// Ask the backend to send a password reset email.
    pub fn forgot_password(&self, email: &str) -> ApiResult<Value> {
        let body = serde_json::json!({ "email": email });
        let response = self.post("/auth/forget-password", &body)?;
        Self::read_ack(response)
    }

    /// Set a new password using the emailed reset token.
    pub fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<Value> {
        let response = self.post("/auth/reset-password", &Self::to_body(request)?)?;
        Self::read_ack(response)
    }

    // ========================= Course Operations =========================

    /// Get every course.
    pub fn get_courses(&self) -> ApiResult<Vec<Course>> {
        let response = self.get("/Course")?;
        Self::read_json(response)
    }

    /// Get a single course by ID.
    pub fn get_course(&self, course_id: &str) -> ApiResult<Course> {
        let response = self.get(&Self::item_path("Course", course_id))?;
        Self::read_json(response)
    }

    /// Create a course and return it as stored.
    pub fn create_course(&self, payload: &CoursePayload) -> ApiResult<Course> {
        tracing::info!("Creating course: {}", payload.title);
        let response = self.post("/Course", &Self::to_body(payload)?)?;
        Self::read_json(response)
    }

    /// Update an existing course.
    pub fn update_course(&self, course_id: &str, payload: &CoursePayload) -> ApiResult<()> {
        let path = Self::item_path("Course", course_id);
        self.put(&path, &Self::to_body(payload)?)?;
        Ok(())
    }

    /// Delete a course.
    pub fn delete_course(&self, course_id: &str) -> ApiResult<()> {
        self.delete(&Self::item_path("Course", course_id))?;
        Ok(())
    }

    /// Delete a file attached to a course.
    pub fn delete_course_material(&self, material_id: &str) -> ApiResult<()> {
        self.delete(&Self::item_path("CourseMaterial", material_id))?;
        Ok(())
    }

    // ========================= Assessment Operations =========================

    /// Get every assessment.
    pub fn get_assessments(&self) -> ApiResult<Vec<Assessment>> {
        let response = self.get("/Assessment")?;
        Self::read_json(response)
    }

    /// Get a single assessment, questions included.
    pub fn get_assessment(&self, assessment_id: &str) -> ApiResult<Assessment> {
        let response = self.get(&Self::item_path("Assessment", assessment_id))?;
        Self::read_json(response)
    }

    /// Create an assessment. The payload must carry its course id.
    pub fn create_assessment(&self, payload: &AssessmentPayload) -> ApiResult<Assessment> {
        if payload.course_id.is_none() {
            return Err(ApiError::InvalidRequest(
                "CourseId is required to create an assessment".to_string(),
            ));
        }
        tracing::info!("Creating assessment: {}", payload.title);
        let response = self.post("/Assessment", &Self::to_body(payload)?)?;
        Self::read_json(response)
    }

    /// Update an existing assessment.
    pub fn update_assessment(
        &self,
        assessment_id: &str,
        payload: &AssessmentPayload,
    ) -> ApiResult<()> {
        let path = Self::item_path("Assessment", assessment_id);
        self.put(&path, &Self::to_body(payload)?)?;
        Ok(())
    }

    /// Delete an assessment.
    pub fn delete_assessment(&self, assessment_id: &str) -> ApiResult<()> {
        self.delete(&Self::item_path("Assessment", assessment_id))?;
        Ok(())
    }

    /// Past attempts of one user as recorded by the backend.
    pub fn get_assessment_history(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>> {
        let path = format!("Assessment/history/{}", urlencoding::encode(user_id));
        let response = self.get(&path)?;
        Self::read_json(response)
    }

    // ========================= Result Operations =========================

    /// Get every recorded result.
    pub fn get_results(&self) -> ApiResult<Vec<AssessmentResult>> {
        let response = self.get("/Result")?;
        Self::read_json(response)
    }

    /// Submit answers for grading.
    pub fn submit_attempt(&self, submission: &AttemptSubmission) -> ApiResult<AssessmentResult> {
        tracing::info!(
            "Submitting attempt for assessment {} by user {}",
            submission.assessment_id,
            submission.user_id
        );
        let response = self.post("/Result/attempt", &Self::to_body(submission)?)?;
        Self::read_json(response)
    }
}
