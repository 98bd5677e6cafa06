use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformStats {
    pub total_courses: u64,
    pub total_students: u64,
    pub total_instructors: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentStats {
    pub total_courses: u64,
    pub completed_courses: u64,
    pub total_hours: f64,
    pub average_progress: f64,
}
