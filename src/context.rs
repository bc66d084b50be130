//! Wiring of the client, cache, repositories and services.

use crate::cache::FetchCache;
use crate::client::{AsyncEduSyncClient, AsyncEduSyncClientImpl, EduSyncClient};
use crate::config::Config;
use crate::metrics::Metrics;
use crate::repositories::{
    ApiAssessmentRepository, ApiCourseRepository, ApiResultRepository, AssessmentRepository,
    CourseRepository, ResultRepository,
};
use crate::services::{
    AnalyticsService, AnalyticsServiceImpl, AssessmentService, AssessmentServiceImpl,
    AuthService, AuthServiceImpl, CourseService, CourseServiceImpl,
};
use crate::session::{token_store_from_config, TokenStore};
use std::sync::Arc;
use tracing::info;

/// Everything an application needs to talk to EduSync.
///
/// The fetch cache is shared by all repositories, and the client and cache
/// report into the same [`Metrics`].
#[derive(Clone)]
pub struct EduSync {
    pub client: Arc<dyn AsyncEduSyncClient>,
    pub cache: FetchCache,
    pub tokens: Arc<dyn TokenStore>,
    pub metrics: Metrics,
    pub auth: Arc<dyn AuthService>,
    pub courses: Arc<dyn CourseService>,
    pub assessments: Arc<dyn AssessmentService>,
    pub analytics: Arc<dyn AnalyticsService>,
}

impl EduSync {
    /// Build with the token store named by the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_token_store(config, token_store_from_config(config))
    }

    pub fn with_token_store(config: &Config, tokens: Arc<dyn TokenStore>) -> Self {
        let metrics = Metrics::new();

        let sync_client = EduSyncClient::new(config, tokens.clone()).with_metrics(metrics.clone());
        let client_impl = Arc::new(AsyncEduSyncClientImpl::new(sync_client));
        let client = client_impl.clone() as Arc<dyn AsyncEduSyncClient>;

        let cache = FetchCache::new(client_impl, config.cache_ttl()).with_metrics(metrics.clone());

        let course_repo = Arc::new(ApiCourseRepository::new(client.clone(), cache.clone()))
            as Arc<dyn CourseRepository>;
        let assessment_repo = Arc::new(ApiAssessmentRepository::new(client.clone(), cache.clone()))
            as Arc<dyn AssessmentRepository>;
        let result_repo = Arc::new(ApiResultRepository::new(client.clone(), cache.clone()))
            as Arc<dyn ResultRepository>;

        let auth = Arc::new(AuthServiceImpl::new(
            client.clone(),
            tokens.clone(),
            cache.clone(),
        )) as Arc<dyn AuthService>;
        let courses = Arc::new(CourseServiceImpl::new(course_repo.clone())) as Arc<dyn CourseService>;
        let assessments = Arc::new(AssessmentServiceImpl::new(
            assessment_repo.clone(),
            result_repo.clone(),
        )) as Arc<dyn AssessmentService>;
        let analytics = Arc::new(AnalyticsServiceImpl::new(
            course_repo,
            assessment_repo,
            result_repo,
        )) as Arc<dyn AnalyticsService>;

        info!(
            api_base_url = %config.api_base_url,
            cache_ttl_ms = config.cache_ttl_ms,
            "EduSync client initialized"
        );

        Self {
            client,
            cache,
            tokens,
            metrics,
            auth,
            courses,
            assessments,
            analytics,
        }
    }
}

impl std::fmt::Debug for EduSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EduSync")
            .field("cache", &self.cache)
            .field("metrics", &self.metrics.summary())
            .finish()
    }
}
