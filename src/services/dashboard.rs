use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::{CourseApi, ListEndpoint};
use crate::error::ViewError;
use crate::models::{Course, Enrollment, EnrollmentRecord, PlatformStats, StudentStats};

pub const FEATURED_LIMIT: u32 = 6;
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

const DASHBOARD_FAILURE: &str = "Failed to load dashboard data.";
const ENROLLMENTS_FAILURE: &str = "Failed to load enrollments";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeOverview {
    pub featured: Vec<Course>,
    pub stats: PlatformStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDashboard {
    pub enrollments: Vec<Enrollment>,
    pub stats: StudentStats,
}

impl StudentDashboard {
    pub fn completed(&self) -> impl Iterator<Item = &Enrollment> {
        self.enrollments.iter().filter(|e| e.is_completed())
    }

    pub fn in_progress(&self) -> impl Iterator<Item = &Enrollment> {
        self.enrollments.iter().filter(|e| !e.is_completed())
    }

    /// First few enrollments with the time each was last touched.
    pub fn recent_activity(&self) -> Vec<(&Enrollment, DateTime<Utc>)> {
        self.enrollments
            .iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(|e| (e, e.last_accessed_at.unwrap_or(e.enrolled_at)))
            .collect()
    }
}

/// Featured courses and platform counters for the landing page. Either
/// request failing leaves the page on its defaults.
pub async fn load_home(api: &dyn CourseApi) -> HomeOverview {
    let params = [
        ("featured", "true".to_string()),
        ("limit", FEATURED_LIMIT.to_string()),
    ];

    match tokio::try_join!(
        api.list_courses(ListEndpoint::Catalog, &params),
        api.platform_stats()
    ) {
        Ok((featured, stats)) => HomeOverview {
            featured: featured.into_page().items,
            stats,
        },
        Err(e) => {
            warn!("Failed to load home overview: {}", e);
            HomeOverview::default()
        }
    }
}

pub async fn load_student_dashboard(api: &dyn CourseApi) -> Result<StudentDashboard, ViewError> {
    let (enrollments, stats) = tokio::try_join!(api.my_enrollments(), api.student_stats())
        .map_err(|source| {
            warn!("Failed to load dashboard: {}", source);
            ViewError {
                message: DASHBOARD_FAILURE,
                source,
            }
        })?;
    info!("Loaded dashboard with {} enrollments", enrollments.len());
    Ok(StudentDashboard { enrollments, stats })
}

pub async fn load_admin_enrollments(api: &dyn CourseApi) -> Result<Vec<EnrollmentRecord>, ViewError> {
    api.all_enrollments().await.map_err(|source| {
        warn!("Failed to load enrollments: {}", source);
        ViewError {
            message: ENROLLMENTS_FAILURE,
            source,
        }
    })
}

/// Category filter options. A failure only costs the dropdown its entries.
pub async fn load_categories(api: &dyn CourseApi) -> Vec<String> {
    match api.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            warn!("Failed to load categories: {}", e);
            Vec::new()
        }
    }
}
