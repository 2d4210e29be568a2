//! Assignment API endpoints.

use std::sync::Arc;

use allocation::can_assign;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use entities::{Assignment, Role};
use resource_store::{AssignmentFilter, ResourceStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedUser, require_manager};
use crate::state::AppState;

/// Query parameters for listing assignments.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssignmentsQuery {
    pub engineer_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

/// Request body for creating an assignment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub engineer_id: Uuid,
    pub project_id: Uuid,
    pub allocation_percentage: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: String,
}

/// Request body for updating an assignment. Omitted fields keep their
/// current values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub engineer_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub allocation_percentage: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub role: Option<String>,
}

/// Lists assignments, sorted by start date.
///
/// Engineers see only their own assignments, whatever filter they ask
/// for.
pub async fn list_assignments<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListAssignmentsQuery>,
) -> ServerResult<Json<Vec<Assignment>>> {
    let engineer_id = match user.role {
        Role::Engineer => Some(user.id),
        Role::Manager => query.engineer_id,
    };

    let mut assignments = state
        .store
        .find_assignments(AssignmentFilter {
            engineer_id,
            project_id: query.project_id,
            ..Default::default()
        })
        .await?;
    assignments.sort_by_key(|assignment| assignment.start_date);

    Ok(Json(assignments))
}

/// Creates a new assignment.
///
/// The advisory check runs first and turns an unstaffable request into
/// a policy error before anything is written. The store then re-checks
/// the overlap budget atomically at write time, so a concurrent writer
/// landing between the two checks surfaces as a conflict, not an
/// over-allocation.
pub async fn create_assignment<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateAssignmentRequest>,
) -> ServerResult<(StatusCode, Json<Assignment>)> {
    require_manager(&user)?;

    let can = can_assign(
        &state.store,
        request.engineer_id,
        request.project_id,
        request.allocation_percentage,
    )
    .await?;
    if !can {
        return Err(ServerError::PolicyDenied(
            "Cannot assign engineer to project. Check skills match and capacity.".to_string(),
        ));
    }

    let assignment = Assignment::new(
        request.engineer_id,
        request.project_id,
        request.allocation_percentage,
        request.start_date,
        request.end_date,
        request.role,
    );
    let assignment = state.store.create_assignment(assignment).await?;

    tracing::info!(assignment_id = %assignment.id, "Assignment created");

    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Updates an assignment, falling back to the stored values for any
/// field the request omits.
///
/// The advisory check runs only when the engineer or the allocation is
/// being changed, evaluated against the merged values. It has no
/// concept of the assignment's previous version; the exclusion of that
/// version from the overlap budget happens in the store's atomic
/// write-time check.
pub async fn update_assignment<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAssignmentRequest>,
) -> ServerResult<Json<Assignment>> {
    require_manager(&user)?;

    let gate_needed = request.engineer_id.is_some() || request.allocation_percentage.is_some();

    let mut assignment = state
        .store
        .get_assignment(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Assignment not found".to_string()))?;

    if let Some(engineer_id) = request.engineer_id {
        assignment.engineer_id = engineer_id;
    }
    if let Some(project_id) = request.project_id {
        assignment.project_id = project_id;
    }
    if let Some(allocation_percentage) = request.allocation_percentage {
        assignment.allocation_percentage = allocation_percentage;
    }
    if let Some(start_date) = request.start_date {
        assignment.start_date = start_date;
    }
    if let Some(end_date) = request.end_date {
        assignment.end_date = end_date;
    }
    if let Some(role) = request.role {
        assignment.role = role;
    }

    if gate_needed {
        let can = can_assign(
            &state.store,
            assignment.engineer_id,
            assignment.project_id,
            assignment.allocation_percentage,
        )
        .await?;
        if !can {
            return Err(ServerError::PolicyDenied(
                "Cannot update assignment. Check skills match and capacity.".to_string(),
            ));
        }
    }

    assignment.updated_at = chrono::Utc::now();
    let assignment = state.store.update_assignment(assignment).await?;

    tracing::info!(assignment_id = %assignment.id, "Assignment updated");

    Ok(Json(assignment))
}

/// Deletes an assignment.
pub async fn delete_assignment<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<serde_json::Value>> {
    require_manager(&user)?;

    state.store.delete_assignment(id).await?;

    tracing::info!(assignment_id = %id, "Assignment deleted");

    Ok(Json(serde_json::json!({
        "message": "Assignment deleted successfully"
    })))
}
