pub mod course;
pub mod enrollment;
pub mod stats;
mod timestamp;

pub use course::{Course, CourseId, CoursePayload, Difficulty};
pub use enrollment::{Enrollment, EnrollmentRecord, EnrollmentStatus, ProgressBand};
pub use stats::{PlatformStats, StudentStats};
