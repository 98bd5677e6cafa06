use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::{CourseApi, ListEndpoint, ListResponse};
use crate::config::ApiConfig;
use crate::error::{ConfigError, FetchError, WriteError};
use crate::models::{
    Course, CourseId, CoursePayload, Enrollment, EnrollmentRecord, PlatformStats, StudentStats,
};

/// `CourseApi` over HTTP/JSON.
pub struct HttpCourseApi {
    client: Client,
    config: ApiConfig,
}

impl HttpCourseApi {
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.url(path));
        match &self.config.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn read<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, FetchError> {
        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::ServerStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            error!("Failed to parse response: {}", e);
            FetchError::Decode(e.to_string())
        })
    }

    async fn write(&self, builder: RequestBuilder) -> Result<Response, WriteError> {
        let response = builder
            .send()
            .await
            .map_err(|e| WriteError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WriteError::ServerStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn write_course(&self, builder: RequestBuilder) -> Result<Course, WriteError> {
        let response = self.write(builder).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WriteError::Network(e.to_string()))?;

        serde_json::from_str::<Course>(&body).map_err(|e| {
            error!("Failed to parse saved course: {}", e);
            WriteError::ServerStatus {
                status: status.as_u16(),
                body: format!("unexpected response body: {}", e),
            }
        })
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn list_courses(
        &self,
        endpoint: ListEndpoint,
        query: &[(&'static str, String)],
    ) -> Result<ListResponse<Course>, FetchError> {
        debug!("GET {} {:?}", endpoint.path(), query);
        self.read(self.request(Method::GET, endpoint.path()).query(query))
            .await
    }

    async fn get_course(&self, id: CourseId) -> Result<Course, FetchError> {
        self.read(self.request(Method::GET, &format!("/api/courses/{}", id)))
            .await
    }

    async fn create_course(&self, payload: &CoursePayload) -> Result<Course, WriteError> {
        self.write_course(self.request(Method::POST, "/api/admin/courses").json(payload))
            .await
    }

    async fn update_course(&self, id: CourseId, payload: &CoursePayload) -> Result<Course, WriteError> {
        let path = format!("/api/admin/courses/{}", id);
        self.write_course(self.request(Method::PUT, &path).json(payload))
            .await
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), WriteError> {
        let path = format!("/api/admin/courses/{}", id);
        self.write(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<String>, FetchError> {
        self.read(self.request(Method::GET, "/api/courses/categories"))
            .await
    }

    async fn platform_stats(&self) -> Result<PlatformStats, FetchError> {
        self.read(self.request(Method::GET, "/api/stats")).await
    }

    async fn my_enrollments(&self) -> Result<Vec<Enrollment>, FetchError> {
        self.read(self.request(Method::GET, "/api/enrollments/my-courses"))
            .await
    }

    async fn student_stats(&self) -> Result<StudentStats, FetchError> {
        self.read(self.request(Method::GET, "/api/students/stats"))
            .await
    }

    async fn all_enrollments(&self) -> Result<Vec<EnrollmentRecord>, FetchError> {
        self.read(self.request(Method::GET, "/api/admin/enrollments"))
            .await
    }
}
