use std::sync::Arc;

use crate::api::{CourseApi, ListEndpoint};
use crate::config::ApiConfig;
use crate::sync::{MutationPipeline, QueryDescriptor, SyncController};

/// Shared handles. Views build their own controllers from it, so no list
/// state is shared between them.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn CourseApi>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(api: Arc<dyn CourseApi>, config: ApiConfig) -> Self {
        Self { api, config }
    }

    pub fn catalog_controller(&self) -> SyncController {
        SyncController::new(
            self.api.clone(),
            ListEndpoint::Catalog,
            QueryDescriptor::new(self.config.page_size),
        )
    }

    pub fn admin_controller(&self) -> SyncController {
        SyncController::new(
            self.api.clone(),
            ListEndpoint::Admin,
            QueryDescriptor::new(self.config.page_size),
        )
    }

    pub fn mutations(&self) -> MutationPipeline {
        MutationPipeline::new(self.api.clone())
    }
}
