//! Async wrapper around the synchronous EduSyncClient.
//!
//! This module provides an async interface to the synchronous client by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::cache::ResourceSource;
use crate::client::EduSyncClient;
use crate::domain::EndpointKey;
use crate::error::{ApiError, ApiResult};
use crate::models::*;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async interface to the EduSync API.
///
/// Repositories and services depend on this trait, so tests can substitute
/// an in-memory implementation.
#[async_trait]
pub trait AsyncEduSyncClient: Send + Sync {
    async fn get_resource(&self, key: &EndpointKey) -> ApiResult<Value>;

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession>;
    async fn register(&self, request: &RegisterRequest) -> ApiResult<Value>;
    async fn forgot_password(&self, email: &str) -> ApiResult<Value>;
    async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<Value>;

    async fn get_course(&self, id: &str) -> ApiResult<Course>;
    async fn create_course(&self, payload: &CoursePayload) -> ApiResult<Course>;
    async fn update_course(&self, id: &str, payload: &CoursePayload) -> ApiResult<()>;
    async fn delete_course(&self, id: &str) -> ApiResult<()>;
    async fn delete_course_material(&self, id: &str) -> ApiResult<()>;

    async fn get_assessment(&self, id: &str) -> ApiResult<Assessment>;
    async fn create_assessment(&self, payload: &AssessmentPayload) -> ApiResult<Assessment>;
    async fn update_assessment(&self, id: &str, payload: &AssessmentPayload) -> ApiResult<()>;
    async fn delete_assessment(&self, id: &str) -> ApiResult<()>;
    async fn get_assessment_history(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>>;

    async fn submit_attempt(&self, submission: &AttemptSubmission)
        -> ApiResult<AssessmentResult>;
}

/// Async wrapper around the synchronous EduSyncClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncEduSyncClientImpl {
    client: Arc<EduSyncClient>,
}

impl AsyncEduSyncClientImpl {
    pub fn new(client: EduSyncClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped blocking client.
    pub fn inner(&self) -> &EduSyncClient {
        &self.client
    }

    /// Run `op` against the client on the blocking pool.
    async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&EduSyncClient) -> ApiResult<T> + Send + 'static,
    {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || op(&client))
            .await
            .map_err(|e| ApiError::Network(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncEduSyncClient for AsyncEduSyncClientImpl {
    async fn get_resource(&self, key: &EndpointKey) -> ApiResult<Value> {
        let key = key.clone();
        self.run(move |c| c.get_resource(&key)).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthSession> {
        let request = request.clone();
        self.run(move |c| c.login(&request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<Value> {
        let request = request.clone();
        self.run(move |c| c.register(&request)).await
    }

    async fn forgot_password(&self, email: &str) -> ApiResult<Value> {
        let email = email.to_string();
        self.run(move |c| c.forgot_password(&email)).await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<Value> {
        let request = request.clone();
        self.run(move |c| c.reset_password(&request)).await
    }

    async fn get_course(&self, id: &str) -> ApiResult<Course> {
        let id = id.to_string();
        self.run(move |c| c.get_course(&id)).await
    }

    async fn create_course(&self, payload: &CoursePayload) -> ApiResult<Course> {
        let payload = payload.clone();
        self.run(move |c| c.create_course(&payload)).await
    }

    async fn update_course(&self, id: &str, payload: &CoursePayload) -> ApiResult<()> {
        let id = id.to_string();
        let payload = payload.clone();
        self.run(move |c| c.update_course(&id, &payload)).await
    }

    async fn delete_course(&self, id: &str) -> ApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_course(&id)).await
    }

    async fn delete_course_material(&self, id: &str) -> ApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_course_material(&id)).await
    }

    async fn get_assessment(&self, id: &str) -> ApiResult<Assessment> {
        let id = id.to_string();
        self.run(move |c| c.get_assessment(&id)).await
    }

    async fn create_assessment(&self, payload: &AssessmentPayload) -> ApiResult<Assessment> {
        let payload = payload.clone();
        self.run(move |c| c.create_assessment(&payload)).await
    }

    async fn update_assessment(&self, id: &str, payload: &AssessmentPayload) -> ApiResult<()> {
        let id = id.to_string();
        let payload = payload.clone();
        self.run(move |c| c.update_assessment(&id, &payload)).await
    }

    async fn delete_assessment(&self, id: &str) -> ApiResult<()> {
        let id = id.to_string();
        self.run(move |c| c.delete_assessment(&id)).await
    }

    async fn get_assessment_history(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>> {
        let user_id = user_id.to_string();
        self.run(move |c| c.get_assessment_history(&user_id)).await
    }

    async fn submit_attempt(
        &self,
        submission: &AttemptSubmission,
    ) -> ApiResult<AssessmentResult> {
        let submission = submission.clone();
        self.run(move |c| c.submit_attempt(&submission)).await
    }
}

/// Cache misses are served by the generic collection GET.
#[async_trait]
impl ResourceSource for AsyncEduSyncClientImpl {
    async fn fetch_resource(&self, key: &EndpointKey) -> ApiResult<Value> {
        AsyncEduSyncClient::get_resource(self, key).await
    }
}
