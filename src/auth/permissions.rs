use crate::{
    auth::Claims,
    models::domain::{CourseRole, Enrollment, Quiz},
};

/// The caller of a batch, with their role resolved for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub course_id: String,
    pub role: Option<CourseRole>,
}

impl Actor {
    /// Platform administrators act as course admins everywhere. Everyone else
    /// gets the role of their active enrollment in `course_id`, if any.
    pub fn resolve(claims: &Claims, course_id: &str, enrollment: Option<&Enrollment>) -> Self {
        let role = if claims.is_platform_admin() {
            Some(CourseRole::Admin)
        } else {
            enrollment
                .filter(|e| e.course_id == course_id && e.user_id == claims.sub)
                .and_then(Enrollment::active_role)
        };

        Actor {
            user_id: claims.sub.clone(),
            course_id: course_id.to_string(),
            role,
        }
    }
}

/// The student an extension is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUser {
    pub user_id: String,
    pub enrollment: Option<Enrollment>,
}

pub trait PermissionOracle: Send + Sync {
    /// Batch-level gate: may this actor grant extensions on the quiz at all.
    fn can_manage_extensions(&self, actor: &Actor, quiz: &Quiz) -> bool;

    fn can_grant_extension(&self, actor: &Actor, quiz: &Quiz, target: &TargetUser) -> bool;
}

/// Teachers and admins of the quiz's course may extend attempts for its
/// actively enrolled students. Anything else is denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseRolePolicy;

impl PermissionOracle for CourseRolePolicy {
    fn can_manage_extensions(&self, actor: &Actor, quiz: &Quiz) -> bool {
        actor.course_id == quiz.course_id
            && actor.role.is_some_and(CourseRole::can_grant_extensions)
    }

    fn can_grant_extension(&self, actor: &Actor, quiz: &Quiz, target: &TargetUser) -> bool {
        if !self.can_manage_extensions(actor, quiz) {
            return false;
        }

        target.enrollment.as_ref().is_some_and(|enrollment| {
            enrollment.user_id == target.user_id
                && enrollment.course_id == quiz.course_id
                && enrollment.active_role() == Some(CourseRole::Student)
        })
    }
}
