//! Project API endpoints.

use std::sync::Arc;

use allocation::{ProjectUtilization, SuitableEngineer, project_utilization};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use entities::{Project, ProjectStatus, Role};
use resource_store::{ProjectFilter, ResourceStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedUser, require_manager};
use crate::state::AppState;

/// Query parameters for listing projects.
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub status: Option<ProjectStatus>,
}

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub required_skills: Vec<String>,
    pub team_size: u32,
    pub status: Option<ProjectStatus>,
}

/// Query parameters for the suitable-engineers lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitableEngineersQuery {
    pub min_availability: Option<i32>,
}

/// A project with its allocation statistics attached.
#[derive(Debug, Serialize)]
pub struct ProjectWithUtilization {
    #[serde(flatten)]
    pub project: Project,
    pub utilization: ProjectUtilization,
}

/// Lists projects with utilization, sorted by start date.
///
/// Managers see only the projects they own; engineers see all of them.
pub async fn list_projects<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListProjectsQuery>,
) -> ServerResult<Json<Vec<ProjectWithUtilization>>> {
    let manager_id = match user.role {
        Role::Manager => Some(user.id),
        Role::Engineer => None,
    };

    let mut projects = state
        .store
        .list_projects(ProjectFilter {
            status: query.status,
            manager_id,
        })
        .await?;
    projects.sort_by_key(|project| project.start_date);

    let mut result = Vec::with_capacity(projects.len());
    for project in projects {
        let utilization = project_utilization(&state.store, project.id).await?;
        result.push(ProjectWithUtilization {
            project,
            utilization,
        });
    }

    Ok(Json(result))
}

/// Creates a new project owned by the calling manager.
pub async fn create_project<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateProjectRequest>,
) -> ServerResult<(StatusCode, Json<Project>)> {
    require_manager(&user)?;

    let mut project = Project::new(
        request.name,
        request.description,
        request.start_date,
        request.end_date,
        request.required_skills,
        request.team_size,
        user.id,
    );
    if let Some(status) = request.status {
        project = project.with_status(status);
    }

    let project = state.store.create_project(project).await?;

    tracing::info!(project_id = %project.id, "Project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// Gets a project by ID, with utilization attached.
pub async fn get_project<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ProjectWithUtilization>> {
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Project not found".to_string()))?;

    let utilization = project_utilization(&state.store, id).await?;

    Ok(Json(ProjectWithUtilization {
        project,
        utilization,
    }))
}

/// Finds engineers with a matching skill and enough capacity at the
/// project's start date.
pub async fn suitable_engineers<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<SuitableEngineersQuery>,
) -> ServerResult<Json<Vec<SuitableEngineer>>> {
    require_manager(&user)?;

    let min_availability = query.min_availability.unwrap_or(0);
    let engineers = allocation::suitable_engineers(&state.store, id, min_availability).await?;

    Ok(Json(engineers))
}
