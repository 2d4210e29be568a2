//! Advisory assignment validation.

use resource_store::ResourceStore;
use uuid::Uuid;

use crate::{capacity, resolve, AllocationResult};

/// Checks whether an engineer could take the proposed allocation on a
/// project.
///
/// The engineer must share at least one skill with the project's
/// required skills, and the capacity left at the project's start date
/// must cover the proposed percentage. Both referenced entities must
/// resolve, and the engineer reference must actually be an engineer.
///
/// This check is advisory. The store re-runs the overlap-budget check
/// atomically when the assignment is written, so a stale answer here can
/// never over-allocate anyone.
pub async fn can_assign(
    store: &impl ResourceStore,
    engineer_id: Uuid,
    project_id: Uuid,
    allocation_percentage: u32,
) -> AllocationResult<bool> {
    let engineer = resolve::engineer(store, engineer_id).await?;
    let project = resolve::project(store, project_id).await?;

    let has_required_skill = project
        .required_skills
        .iter()
        .any(|skill| engineer.has_skill(skill));
    if !has_required_skill {
        tracing::debug!(
            engineer_id = %engineer_id,
            project_id = %project_id,
            "engineer shares no required skill with project"
        );
        return Ok(false);
    }

    let available =
        capacity::available_capacity(store, engineer_id, Some(project.start_date)).await?;
    Ok(available >= allocation_percentage as i32)
}
