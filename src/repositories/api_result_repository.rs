use crate::cache::FetchCache;
use crate::client::AsyncEduSyncClient;
use crate::error::ApiResult;
use crate::models::{AssessmentResult, AttemptSubmission};
use crate::repositories::keys;
use crate::repositories::traits::ResultRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Result repository backed by the EduSync API.
pub struct ApiResultRepository {
    client: Arc<dyn AsyncEduSyncClient>,
    cache: FetchCache,
}

impl ApiResultRepository {
    pub fn new(client: Arc<dyn AsyncEduSyncClient>, cache: FetchCache) -> Self {
        Self { client, cache }
    }
}

#[async_trait]
impl ResultRepository for ApiResultRepository {
    async fn list(&self, force_refresh: bool) -> ApiResult<Vec<AssessmentResult>> {
        self.cache.fetch_as(keys::RESULT, force_refresh).await
    }

    async fn submit_attempt(
        &self,
        submission: &AttemptSubmission,
    ) -> ApiResult<AssessmentResult> {
        let result = self.client.submit_attempt(submission).await?;
        self.cache.invalidate(Some(keys::RESULT));
        Ok(result)
    }
}
