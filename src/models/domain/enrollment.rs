use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's membership in a course.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Enrollment {
    pub id: String,
    pub course_id: String,
    pub user_id: String,
    pub role: CourseRole,
    pub state: EnrollmentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseRole {
    Student,
    Teacher,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    Active,
    Invited,
    Completed,
    Inactive,
}

impl CourseRole {
    pub fn can_grant_extensions(self) -> bool {
        matches!(self, CourseRole::Teacher | CourseRole::Admin)
    }
}

impl Enrollment {
    pub fn new(course_id: &str, user_id: &str, role: CourseRole) -> Self {
        Enrollment {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            user_id: user_id.to_string(),
            role,
            state: EnrollmentState::Active,
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == EnrollmentState::Active
    }

    /// The role this enrollment grants, or `None` unless it is active.
    pub fn active_role(&self) -> Option<CourseRole> {
        self.is_active().then_some(self.role)
    }
}
