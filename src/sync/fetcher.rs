use std::sync::Arc;

use tracing::debug;

use crate::api::{CourseApi, ListEndpoint, Page};
use crate::error::FetchError;
use crate::models::Course;
use crate::sync::query::QueryDescriptor;

/// Reads one list endpoint for a descriptor and normalizes the body.
#[derive(Clone)]
pub struct ResourceFetcher {
    api: Arc<dyn CourseApi>,
    endpoint: ListEndpoint,
}

impl ResourceFetcher {
    pub fn new(api: Arc<dyn CourseApi>, endpoint: ListEndpoint) -> Self {
        Self { api, endpoint }
    }

    pub fn endpoint(&self) -> ListEndpoint {
        self.endpoint
    }

    pub async fn fetch(&self, query: &QueryDescriptor) -> Result<Page<Course>, FetchError> {
        let params = query.to_query_pairs();
        let response = self.api.list_courses(self.endpoint, &params).await?;
        let page = response.into_page();
        debug!(
            "Fetched {} courses from {} (total_pages={})",
            page.items.len(),
            self.endpoint.path(),
            page.total_pages
        );
        Ok(page)
    }
}
