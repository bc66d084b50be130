use crate::cache::FetchCache;
use crate::client::AsyncEduSyncClient;
use crate::error::ApiResult;
use crate::models::{Course, CoursePayload};
use crate::repositories::keys;
use crate::repositories::traits::CourseRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Course repository backed by the EduSync API.
///
/// `list` reads through the fetch cache; writes go straight to the client and
/// then invalidate the `"Course"` entry.
pub struct ApiCourseRepository {
    client: Arc<dyn AsyncEduSyncClient>,
    cache: FetchCache,
}

impl ApiCourseRepository {
    pub fn new(client: Arc<dyn AsyncEduSyncClient>, cache: FetchCache) -> Self {
        Self { client, cache }
    }
}

#[async_trait]
impl CourseRepository for ApiCourseRepository {
    async fn list(&self, force_refresh: bool) -> ApiResult<Vec<Course>> {
        self.cache.fetch_as(keys::COURSE, force_refresh).await
    }

    async fn get(&self, id: &str) -> ApiResult<Course> {
        self.client.get_course(id).await
    }

    async fn create(&self, payload: &CoursePayload) -> ApiResult<Course> {
        let course = self.client.create_course(payload).await?;
        self.cache.invalidate(Some(keys::COURSE));
        Ok(course)
    }

    async fn update(&self, id: &str, payload: &CoursePayload) -> ApiResult<()> {
        self.client.update_course(id, payload).await?;
        self.cache.invalidate(Some(keys::COURSE));
        Ok(())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete_course(id).await?;
        self.cache.invalidate(Some(keys::COURSE));
        Ok(())
    }

    async fn delete_material(&self, material_id: &str) -> ApiResult<()> {
        // materials are embedded in course listings
        self.client.delete_course_material(material_id).await?;
        self.cache.invalidate(Some(keys::COURSE));
        Ok(())
    }
}
