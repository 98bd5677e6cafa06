pub mod dto;
pub mod http;

use async_trait::async_trait;

use crate::error::{FetchError, WriteError};
use crate::models::{
    Course, CourseId, CoursePayload, Enrollment, EnrollmentRecord, PlatformStats, StudentStats,
};

pub use dto::{ListResponse, Page};
pub use http::HttpCourseApi;

/// The two course collections the front-end lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListEndpoint {
    /// Public catalog, paginated in an envelope.
    Catalog,
    /// Admin course table, returned as a bare array.
    Admin,
}

impl ListEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ListEndpoint::Catalog => "/api/courses",
            ListEndpoint::Admin => "/api/admin/courses",
        }
    }

    /// Banner text shown when a list fetch fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ListEndpoint::Catalog => "Failed to load courses. Please try again.",
            ListEndpoint::Admin => "Failed to load courses.",
        }
    }
}

/// Backend REST surface consumed by the front-end.
///
/// Implementations turn every transport and decoding failure into a typed
/// error; nothing panics or escapes past this boundary.
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn list_courses(
        &self,
        endpoint: ListEndpoint,
        query: &[(&'static str, String)],
    ) -> Result<ListResponse<Course>, FetchError>;

    async fn get_course(&self, id: CourseId) -> Result<Course, FetchError>;

    async fn create_course(&self, payload: &CoursePayload) -> Result<Course, WriteError>;

    async fn update_course(&self, id: CourseId, payload: &CoursePayload) -> Result<Course, WriteError>;

    async fn delete_course(&self, id: CourseId) -> Result<(), WriteError>;

    async fn list_categories(&self) -> Result<Vec<String>, FetchError>;

    async fn platform_stats(&self) -> Result<PlatformStats, FetchError>;

    async fn my_enrollments(&self) -> Result<Vec<Enrollment>, FetchError>;

    async fn student_stats(&self) -> Result<StudentStats, FetchError>;

    async fn all_enrollments(&self) -> Result<Vec<EnrollmentRecord>, FetchError>;
}
