use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_courses: u64,
    pub total_enrollments: u64,
    pub active_courses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    StudentCreated,
    CourseCreated,
    EnrollmentCreated,
    EnrollmentDeleted,
}

/// Derived dashboard feed entry; recomputed on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedActivities {
    pub activities: Vec<ActivityRecord>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_activities: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Query sent to an upstream list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub newest_first: bool,
}

impl ListQuery {
    /// Smallest page, only the total count is of interest
    pub fn count_only() -> Self {
        Self {
            limit: 1,
            newest_first: false,
        }
    }

    pub fn most_recent(limit: u32) -> Self {
        Self {
            limit,
            newest_first: true,
        }
    }
}

/// `{ data: [...], pagination: { total, ... } }` as served by the list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<ListPagination>,
}

impl<T> ListPage<T> {
    pub fn total(&self) -> u64 {
        self.pagination.as_ref().map(|p| p.total).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPagination {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl PersonName {
    fn full_name(&self) -> Option<String> {
        let first = self.first_name.as_deref()?;
        let last = self.last_name.as_deref().unwrap_or_default();
        Some(format!("{} {}", first, last).trim().to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: String,
    #[serde(default)]
    pub user: Option<PersonName>,
    #[serde(flatten)]
    pub name: PersonName,
    pub created_at: DateTime<Utc>,
}

impl StudentSummary {
    /// Name from the linked user, falling back to fields on the student itself
    pub fn display_name(&self) -> Option<String> {
        self.user
            .as_ref()
            .and_then(PersonName::full_name)
            .or_else(|| self.name.full_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CourseSummary {
    pub fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| self.title.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledStudent {
    #[serde(default)]
    pub user: Option<PersonName>,
    #[serde(flatten)]
    pub name: PersonName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSummary {
    pub id: String,
    #[serde(default)]
    pub student: Option<EnrolledStudent>,
    #[serde(default)]
    pub course: Option<EnrolledCourse>,
    pub created_at: DateTime<Utc>,
}

impl EnrollmentSummary {
    pub fn student_name(&self) -> Option<String> {
        let student = self.student.as_ref()?;
        student
            .user
            .as_ref()
            .and_then(PersonName::full_name)
            .or_else(|| student.name.full_name())
    }

    pub fn course_name(&self) -> Option<String> {
        let course = self.course.as_ref()?;
        course.name.clone().or_else(|| course.title.clone())
    }
}
