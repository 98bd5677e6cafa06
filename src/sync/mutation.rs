use std::sync::Arc;

use tracing::{info, warn};

use crate::api::CourseApi;
use crate::error::WriteError;
use crate::form::{CourseDraft, from_draft};
use crate::models::{Course, CourseId};

/// Create, update and delete for single courses.
///
/// Drafts are parsed before anything is sent; a draft that does not parse
/// never reaches the network. The pipeline does not refresh any list on its
/// own, callers follow a successful write with `SyncController::refresh`.
#[derive(Clone)]
pub struct MutationPipeline {
    api: Arc<dyn CourseApi>,
}

impl MutationPipeline {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self { api }
    }

    pub async fn create(&self, draft: &CourseDraft) -> Result<Course, WriteError> {
        let payload = from_draft(draft)?;
        let course = self.api.create_course(&payload).await.inspect_err(|e| {
            warn!("Failed to create course '{}': {}", payload.title, e);
        })?;
        info!("Created course {} ({})", course.id, course.title);
        Ok(course)
    }

    pub async fn update(&self, id: CourseId, draft: &CourseDraft) -> Result<Course, WriteError> {
        let payload = from_draft(draft)?;
        let course = self.api.update_course(id, &payload).await.inspect_err(|e| {
            warn!("Failed to update course {}: {}", id, e);
        })?;
        info!("Updated course {} ({})", course.id, course.title);
        Ok(course)
    }

    /// Confirmation is the caller's job; this deletes unconditionally.
    pub async fn remove(&self, id: CourseId) -> Result<(), WriteError> {
        self.api.delete_course(id).await.inspect_err(|e| {
            warn!("Failed to delete course {}: {}", id, e);
        })?;
        info!("Deleted course {}", id);
        Ok(())
    }
}
