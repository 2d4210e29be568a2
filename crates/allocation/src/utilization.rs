//! Utilization aggregates.

use std::collections::HashSet;

use resource_store::{AssignmentFilter, ResourceStore};
use serde::Serialize;
use uuid::Uuid;

use crate::{capacity, resolve, AllocationResult};

/// Allocation statistics for a single project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUtilization {
    /// Sum of allocation percentages over every assignment on the
    /// project.
    pub total_allocated: u32,
    /// Distinct engineers with at least one assignment on the project.
    pub assigned_engineers: u32,
    /// Planned team capacity minus the allocated total. Negative when
    /// the project is staffed past its plan.
    pub remaining_capacity: i32,
}

/// Computes allocation statistics for a project.
///
/// Every assignment ever linked to the project counts, past and future
/// alike. Day-accurate numbers come from the capacity calculations,
/// which do filter by date.
pub async fn project_utilization(
    store: &impl ResourceStore,
    project_id: Uuid,
) -> AllocationResult<ProjectUtilization> {
    let project = resolve::project(store, project_id).await?;
    let assignments = store
        .find_assignments(AssignmentFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
        .await?;

    let engineers: HashSet<Uuid> = assignments.iter().map(|a| a.engineer_id).collect();
    let total_allocated: u32 = assignments.iter().map(|a| a.allocation_percentage).sum();

    Ok(ProjectUtilization {
        total_allocated,
        assigned_engineers: engineers.len() as u32,
        remaining_capacity: project.total_capacity() as i32 - total_allocated as i32,
    })
}

/// Utilization across the whole engineer pool for today, as a rounded
/// percentage of combined capacity. Returns 0 when there are no
/// engineers (or no capacity) to measure.
pub async fn department_utilization(store: &impl ResourceStore) -> AllocationResult<u32> {
    let engineers = resolve::engineers(store).await?;
    let today = capacity::today();

    let mut total_capacity: u32 = 0;
    let mut total_allocated: u32 = 0;
    for engineer in &engineers {
        total_capacity += engineer.max_capacity();
        total_allocated += capacity::allocated_capacity(store, engineer.id, today).await?;
    }

    if total_capacity == 0 {
        return Ok(0);
    }
    Ok(((total_allocated as f64 / total_capacity as f64) * 100.0).round() as u32)
}
