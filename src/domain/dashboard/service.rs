use chrono::Utc;
use std::sync::Arc;

use super::error::DashboardServiceError;
use super::fallback::fallback_activities;
use super::model::{
    ActivityRecord, ActivityType, CourseSummary, DashboardStats, EnrollmentSummary, ListQuery,
    PaginatedActivities, StudentSummary,
};
use super::CatalogApi;

pub const MAX_PAGES: u32 = 3;
pub const ACTIVITIES_PER_PAGE: usize = 5;
pub const MAX_ACTIVITIES: usize = 15;
pub const RECENT_FETCH_LIMIT: u32 = 10;
pub(crate) const ACTIVITY_USER: &str = "Admin";

pub struct DashboardService {
    catalog: Arc<dyn CatalogApi>,
}

impl DashboardService {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }

    /// Totals across the catalog; any upstream failure yields all zeros
    pub async fn get_dashboard_stats(&self) -> DashboardStats {
        match self.try_dashboard_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard stats unavailable, returning zeros");
                DashboardStats::default()
            }
        }
    }

    pub async fn try_dashboard_stats(&self) -> Result<DashboardStats, DashboardServiceError> {
        let query = ListQuery::count_only();
        let (students, courses, enrollments) = tokio::try_join!(
            self.catalog.list_students(&query),
            self.catalog.list_courses(&query),
            self.catalog.list_enrollments(&query),
        )?;

        let total_courses = courses.total();
        Ok(DashboardStats {
            total_students: students.total(),
            total_courses,
            total_enrollments: enrollments.total(),
            // No course status upstream; every course counts as active
            active_courses: total_courses,
        })
    }

    pub async fn get_paginated_activities(
        &self,
        page: u32,
    ) -> Result<PaginatedActivities, DashboardServiceError> {
        if !(1..=MAX_PAGES).contains(&page) {
            return Err(DashboardServiceError::InvalidPage {
                page,
                max: MAX_PAGES,
            });
        }

        let activities = match self.fetch_recent_activities().await {
            Ok(activities) => activities,
            Err(e) => {
                tracing::warn!(error = %e, "Recent activities unavailable, serving placeholders");
                fallback_activities(Utc::now())
            }
        };

        Ok(paginate_activities(activities, page))
    }

    pub async fn fetch_recent_activities(
        &self,
    ) -> Result<Vec<ActivityRecord>, DashboardServiceError> {
        let query = ListQuery::most_recent(RECENT_FETCH_LIMIT);
        let (students, courses, enrollments) = tokio::try_join!(
            self.catalog.list_students(&query),
            self.catalog.list_courses(&query),
            self.catalog.list_enrollments(&query),
        )?;

        Ok(merge_activities(
            &students.data,
            &courses.data,
            &enrollments.data,
        ))
    }
}

fn student_activity(student: &StudentSummary) -> ActivityRecord {
    let name = student
        .display_name()
        .unwrap_or_else(|| "Unknown student".to_string());
    ActivityRecord {
        id: format!("student_{}", student.id),
        activity_type: ActivityType::StudentCreated,
        description: format!("New student added: {}", name),
        created_at: student.created_at,
        user: ACTIVITY_USER.to_string(),
    }
}

fn course_activity(course: &CourseSummary) -> ActivityRecord {
    let name = course
        .display_name()
        .unwrap_or_else(|| "Unknown course".to_string());
    ActivityRecord {
        id: format!("course_{}", course.id),
        activity_type: ActivityType::CourseCreated,
        description: format!("New course created: {}", name),
        created_at: course.created_at,
        user: ACTIVITY_USER.to_string(),
    }
}

fn enrollment_activity(enrollment: &EnrollmentSummary) -> ActivityRecord {
    let student = enrollment
        .student_name()
        .unwrap_or_else(|| "Unknown student".to_string());
    let course = enrollment
        .course_name()
        .unwrap_or_else(|| "Unknown course".to_string());
    ActivityRecord {
        id: format!("enrollment_{}", enrollment.id),
        activity_type: ActivityType::EnrollmentCreated,
        description: format!("Student enrolled: {} - {}", student, course),
        created_at: enrollment.created_at,
        user: ACTIVITY_USER.to_string(),
    }
}

/// Newest first, capped at `MAX_ACTIVITIES`. Ties keep students, then
/// courses, then enrollments.
pub fn merge_activities(
    students: &[StudentSummary],
    courses: &[CourseSummary],
    enrollments: &[EnrollmentSummary],
) -> Vec<ActivityRecord> {
    let mut activities: Vec<ActivityRecord> = students
        .iter()
        .map(student_activity)
        .chain(courses.iter().map(course_activity))
        .chain(enrollments.iter().map(enrollment_activity))
        .collect();

    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    activities.truncate(MAX_ACTIVITIES);
    activities
}

pub fn paginate_activities(activities: Vec<ActivityRecord>, page: u32) -> PaginatedActivities {
    let total_activities = activities.len();
    let total_pages = (total_activities.div_ceil(ACTIVITIES_PER_PAGE) as u32).min(MAX_PAGES);
    let start = page.saturating_sub(1) as usize * ACTIVITIES_PER_PAGE;

    PaginatedActivities {
        activities: activities
            .into_iter()
            .skip(start)
            .take(ACTIVITIES_PER_PAGE)
            .collect(),
        current_page: page,
        total_pages,
        total_activities,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    }
}
