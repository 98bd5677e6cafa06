use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::course::{Course, CourseId};
use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Active,
    Completed,
}

/// A student's enrollment as shown on their dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub course: Course,
    #[serde(default)]
    pub progress: f64,
    pub status: EnrollmentStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub enrolled_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub last_accessed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Low,
    Medium,
    High,
}

impl Enrollment {
    /// Progress clamped to 0..=100.
    pub fn progress_percent(&self) -> f64 {
        self.progress.clamp(0.0, 100.0)
    }

    pub fn progress_band(&self) -> ProgressBand {
        let progress = self.progress_percent();
        if progress >= 80.0 {
            ProgressBand::High
        } else if progress >= 50.0 {
            ProgressBand::Medium
        } else {
            ProgressBand::Low
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == EnrollmentStatus::Completed
    }
}

/// A paid enrollment as listed on the admin side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub id: i64,
    #[serde(default)]
    pub course_id: Option<CourseId>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_id: Option<String>,
    pub status: String,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl EnrollmentRecord {
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case("completed")
    }

    pub fn is_pending(&self) -> bool {
        self.status.eq_ignore_ascii_case("pending")
    }
}
