pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use permissions::{Actor, CourseRolePolicy, PermissionOracle, TargetUser};
