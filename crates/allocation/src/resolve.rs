//! Id resolution with role preconditions.

use entities::{Project, Role, User};
use resource_store::{ResourceStore, UserFilter};
use uuid::Uuid;

use crate::{AllocationError, AllocationResult};

/// Resolves an id to an engineer-role user. A manager's id is a miss.
pub(crate) async fn engineer(store: &impl ResourceStore, id: Uuid) -> AllocationResult<User> {
    match store.get_user(id).await? {
        Some(user) if user.is_engineer() => Ok(user),
        _ => Err(AllocationError::not_found("Engineer", id.to_string())),
    }
}

/// Resolves an id to a project.
pub(crate) async fn project(store: &impl ResourceStore, id: Uuid) -> AllocationResult<Project> {
    store
        .get_project(id)
        .await?
        .ok_or_else(|| AllocationError::not_found("Project", id.to_string()))
}

/// Lists every engineer-role user.
pub(crate) async fn engineers(store: &impl ResourceStore) -> AllocationResult<Vec<User>> {
    Ok(store
        .list_users(UserFilter {
            role: Some(Role::Engineer),
            ..Default::default()
        })
        .await?)
}
