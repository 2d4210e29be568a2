//! Resource store trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;
use entities::{Assignment, Project, ProjectStatus, Role, User};
use uuid::Uuid;

use crate::StoreResult;

/// Filter options for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Filter by role.
    pub role: Option<Role>,
    /// Filter by department.
    pub department: Option<String>,
}

/// Filter options for listing projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Filter by status.
    pub status: Option<ProjectStatus>,
    /// Filter by owning manager.
    pub manager_id: Option<Uuid>,
}

/// Filter options for listing assignments.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    /// Filter by engineer.
    pub engineer_id: Option<Uuid>,
    /// Filter by project.
    pub project_id: Option<Uuid>,
    /// Only assignments whose range contains this day.
    pub containing_date: Option<NaiveDate>,
}

/// Trait for resource storage operations.
///
/// Write operations validate their input before touching storage.
/// Assignment writes additionally run the overlap-budget check and the
/// insert as one atomic step, which is the serialization point that keeps
/// an engineer's overlapping allocations at or below 100% no matter how
/// writers interleave.
///
/// List operations return rows ordered by creation time (ties broken by
/// id) so aggregation over them is deterministic.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. Fails if the email is already taken.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Gets a user by email. The lookup is case-insensitive.
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Updates a user.
    async fn update_user(&self, user: User) -> StoreResult<User>;

    /// Lists users matching the filter.
    async fn list_users(&self, filter: UserFilter) -> StoreResult<Vec<User>>;

    // =========================================================================
    // Project operations
    // =========================================================================

    /// Creates a new project. The manager reference must resolve to a
    /// manager-role user.
    async fn create_project(&self, project: Project) -> StoreResult<Project>;

    /// Gets a project by ID.
    async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Updates a project.
    async fn update_project(&self, project: Project) -> StoreResult<Project>;

    /// Lists projects matching the filter.
    async fn list_projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>>;

    // =========================================================================
    // Assignment operations
    // =========================================================================

    /// Creates a new assignment. The engineer reference must resolve to
    /// an engineer-role user, the project must exist, the assignment
    /// dates must fall within the project dates, and the engineer's
    /// overlapping allocations must stay within budget.
    async fn create_assignment(&self, assignment: Assignment) -> StoreResult<Assignment>;

    /// Gets an assignment by ID.
    async fn get_assignment(&self, id: Uuid) -> StoreResult<Option<Assignment>>;

    /// Updates an assignment. Runs the same checks as creation, with the
    /// assignment's previous version excluded from the overlap budget.
    async fn update_assignment(&self, assignment: Assignment) -> StoreResult<Assignment>;

    /// Deletes an assignment.
    async fn delete_assignment(&self, id: Uuid) -> StoreResult<()>;

    /// Lists assignments matching the filter.
    async fn find_assignments(&self, filter: AssignmentFilter) -> StoreResult<Vec<Assignment>>;
}
