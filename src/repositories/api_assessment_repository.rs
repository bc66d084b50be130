use crate::cache::FetchCache;
use crate::client::AsyncEduSyncClient;
use crate::error::ApiResult;
use crate::models::{Assessment, AssessmentPayload, AssessmentResult};
use crate::repositories::keys;
use crate::repositories::traits::AssessmentRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Assessment repository backed by the EduSync API.
pub struct ApiAssessmentRepository {
    client: Arc<dyn AsyncEduSyncClient>,
    cache: FetchCache,
}

impl ApiAssessmentRepository {
    pub fn new(client: Arc<dyn AsyncEduSyncClient>, cache: FetchCache) -> Self {
        Self { client, cache }
    }
}

#[async_trait]
impl AssessmentRepository for ApiAssessmentRepository {
    async fn list(&self, force_refresh: bool) -> ApiResult<Vec<Assessment>> {
        self.cache.fetch_as(keys::ASSESSMENT, force_refresh).await
    }

    async fn get(&self, id: &str) -> ApiResult<Assessment> {
        self.client.get_assessment(id).await
    }

    async fn create(&self, payload: &AssessmentPayload) -> ApiResult<Assessment> {
        let assessment = self.client.create_assessment(payload).await?;
        self.cache.invalidate(Some(keys::ASSESSMENT));
        Ok(assessment)
    }

    async fn update(&self, id: &str, payload: &AssessmentPayload) -> ApiResult<()> {
        self.client.update_assessment(id, payload).await?;
        self.cache.invalidate(Some(keys::ASSESSMENT));
        Ok(())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete_assessment(id).await?;
        self.cache.invalidate(Some(keys::ASSESSMENT));
        Ok(())
    }

    async fn history_for_user(&self, user_id: &str) -> ApiResult<Vec<AssessmentResult>> {
        self.client.get_assessment_history(user_id).await
    }
}
