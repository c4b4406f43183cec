pub mod error;
pub mod fallback;
pub mod model;
pub mod service;

pub use error::DashboardServiceError;
pub use model::{
    ActivityRecord, ActivityType, CourseSummary, DashboardStats, EnrollmentSummary, ListPage,
    ListQuery, PaginatedActivities, StudentSummary,
};
pub use service::{DashboardService, ACTIVITIES_PER_PAGE, MAX_ACTIVITIES, MAX_PAGES};

use async_trait::async_trait;

/// Read access to the upstream student, course and enrollment lists
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_students(
        &self,
        query: &ListQuery,
    ) -> Result<ListPage<StudentSummary>, DashboardServiceError>;

    async fn list_courses(
        &self,
        query: &ListQuery,
    ) -> Result<ListPage<CourseSummary>, DashboardServiceError>;

    async fn list_enrollments(
        &self,
        query: &ListQuery,
    ) -> Result<ListPage<EnrollmentSummary>, DashboardServiceError>;
}
