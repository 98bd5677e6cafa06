pub mod dashboard;

pub use dashboard::{
    HomeOverview, StudentDashboard, load_admin_enrollments, load_categories, load_home,
    load_student_dashboard,
};
