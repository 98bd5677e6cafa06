#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use catalog_sync::api::{CourseApi, ListEndpoint, ListResponse};
use catalog_sync::error::{FetchError, WriteError};
use catalog_sync::models::{
    Course, CourseId, CoursePayload, Difficulty, Enrollment, EnrollmentRecord, PlatformStats,
    StudentStats,
};

pub fn course(id: CourseId, title: &str, category: &str) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: format!("All about {}", title),
        instructor: "Ada".to_string(),
        category: category.to_string(),
        difficulty: Difficulty::Beginner,
        duration: 10,
        price: 29.99,
        thumbnail: None,
        curriculum: vec!["Intro".to_string(), "Basics".to_string()],
        requirements: Vec::new(),
        active: true,
        enrolled_students: 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Bare,
    Envelope,
}

/// In-memory `CourseApi` with per-search delays and injectable failures.
pub struct FakeApi {
    courses: Mutex<Vec<Course>>,
    shape: Shape,
    delays: Mutex<HashMap<String, Duration>>,
    fail_lists: Mutex<Option<FetchError>>,
    next_id: Mutex<CourseId>,
    pub list_calls: Mutex<Vec<Vec<(&'static str, String)>>>,
    pub write_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(courses: Vec<Course>, shape: Shape) -> Self {
        let next_id = courses.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            courses: Mutex::new(courses),
            shape,
            delays: Mutex::new(HashMap::new()),
            fail_lists: Mutex::new(None),
            next_id: Mutex::new(next_id),
            list_calls: Mutex::new(Vec::new()),
            write_calls: AtomicUsize::new(0),
        }
    }

    /// Delay list responses whose `search` parameter equals `search`.
    pub fn delay_search(&self, search: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(search.to_string(), delay);
    }

    pub fn fail_lists_with(&self, err: Option<FetchError>) {
        *self.fail_lists.lock().unwrap() = err;
    }

    pub fn writes(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn last_list_call(&self) -> Vec<(&'static str, String)> {
        self.list_calls.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn remove_directly(&self, id: CourseId) {
        self.courses.lock().unwrap().retain(|c| c.id != id);
    }
}

pub fn param<'a>(query: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
    query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
}

#[async_trait]
impl CourseApi for FakeApi {
    async fn list_courses(
        &self,
        _endpoint: ListEndpoint,
        query: &[(&'static str, String)],
    ) -> Result<ListResponse<Course>, FetchError> {
        self.list_calls.lock().unwrap().push(query.to_vec());

        let search = param(query, "search").unwrap_or("").to_string();
        let delay = self.delays.lock().unwrap().get(&search).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.fail_lists.lock().unwrap().clone();
        if let Some(err) = failure {
            return Err(err);
        }

        let category = param(query, "category");
        let difficulty = param(query, "difficulty");
        let matching: Vec<Course> = self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| search.is_empty() || c.title.to_lowercase().contains(&search.to_lowercase()))
            .filter(|c| category.is_none_or(|cat| c.category == cat))
            .filter(|c| difficulty.is_none_or(|d| c.difficulty.as_str() == d))
            .cloned()
            .collect();

        match self.shape {
            Shape::Bare => Ok(ListResponse::bare(matching)),
            Shape::Envelope => {
                let page: usize = param(query, "page").and_then(|p| p.parse().ok()).unwrap_or(1);
                let limit: usize = param(query, "limit").and_then(|l| l.parse().ok()).unwrap_or(12);
                let total_pages = matching.len().div_ceil(limit) as u32;
                let content = matching.into_iter().skip((page - 1) * limit).take(limit).collect();
                Ok(ListResponse::envelope(content, total_pages))
            }
        }
    }

    async fn get_course(&self, id: CourseId) -> Result<Course, FetchError> {
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(FetchError::ServerStatus {
                status: 404,
                body: String::new(),
            })
    }

    async fn create_course(&self, payload: &CoursePayload) -> Result<Course, WriteError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        let course = payload.clone().into_course(id);
        self.courses.lock().unwrap().push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: CourseId, payload: &CoursePayload) -> Result<Course, WriteError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut courses = self.courses.lock().unwrap();
        let slot = courses.iter_mut().find(|c| c.id == id).ok_or(WriteError::ServerStatus {
            status: 404,
            body: String::new(),
        })?;
        *slot = payload.clone().into_course(id);
        Ok(slot.clone())
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), WriteError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != id);
        if courses.len() == before {
            return Err(WriteError::ServerStatus {
                status: 404,
                body: String::new(),
            });
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<String>, FetchError> {
        let mut categories: Vec<String> =
            self.courses.lock().unwrap().iter().map(|c| c.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn platform_stats(&self) -> Result<PlatformStats, FetchError> {
        Ok(PlatformStats {
            total_courses: self.courses.lock().unwrap().len() as u64,
            ..PlatformStats::default()
        })
    }

    async fn my_enrollments(&self) -> Result<Vec<Enrollment>, FetchError> {
        Ok(Vec::new())
    }

    async fn student_stats(&self) -> Result<StudentStats, FetchError> {
        Err(FetchError::ServerStatus {
            status: 401,
            body: "not a student".to_string(),
        })
    }

    async fn all_enrollments(&self) -> Result<Vec<EnrollmentRecord>, FetchError> {
        Ok(Vec::new())
    }
}
