use chrono::{DateTime, Duration, Utc};

use super::model::{ActivityRecord, ActivityType};
use super::service::{ACTIVITY_USER, MAX_ACTIVITIES};

const ACTIVITY_CYCLE: [ActivityType; 4] = [
    ActivityType::StudentCreated,
    ActivityType::CourseCreated,
    ActivityType::EnrollmentCreated,
    ActivityType::EnrollmentDeleted,
];

const PLACEHOLDER_STUDENTS: [&str; 5] = [
    "Ada Lovelace",
    "Alan Turing",
    "Grace Hopper",
    "Edsger Dijkstra",
    "Barbara Liskov",
];

const PLACEHOLDER_COURSES: [&str; 5] = [
    "Introduction to Programming",
    "Linear Algebra",
    "Operating Systems",
    "Databases",
    "Compilers",
];

/// Placeholder feed shown when the upstream lists cannot be read. Content and
/// order depend only on `anchor`, entries are two hours apart.
pub fn fallback_activities(anchor: DateTime<Utc>) -> Vec<ActivityRecord> {
    (0..MAX_ACTIVITIES)
        .map(|i| {
            let activity_type = ACTIVITY_CYCLE[i % ACTIVITY_CYCLE.len()];
            let student = PLACEHOLDER_STUDENTS[i % PLACEHOLDER_STUDENTS.len()];
            let course = PLACEHOLDER_COURSES[i % PLACEHOLDER_COURSES.len()];

            let description = match activity_type {
                ActivityType::StudentCreated => format!("New student added: {}", student),
                ActivityType::CourseCreated => format!("New course created: {}", course),
                ActivityType::EnrollmentCreated => {
                    format!("Student enrolled: {} - {}", student, course)
                }
                ActivityType::EnrollmentDeleted => {
                    format!("Enrollment removed: {} - {}", student, course)
                }
            };

            ActivityRecord {
                id: format!("fallback_{}", i + 1),
                activity_type,
                description,
                created_at: anchor - Duration::hours(2 * i as i64),
                user: ACTIVITY_USER.to_string(),
            }
        })
        .collect()
}
