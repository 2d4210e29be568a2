//! Dashboard API endpoints.

use std::sync::Arc;

use allocation::{allocated_capacity, department_utilization};
use axum::{Extension, Json, extract::State};
use chrono::NaiveDate;
use entities::{ProjectStatus, Role};
use resource_store::{AssignmentFilter, ProjectFilter, ResourceStore, UserFilter};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedUser, require_engineer, require_manager};
use crate::state::AppState;

/// One engineer's allocation snapshot on the manager dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerAllocation {
    pub id: Uuid,
    pub name: String,
    pub current_allocation: u32,
    pub max_capacity: u32,
}

/// Staffing status of one managed project.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStaffing {
    pub id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
    pub team_size: u32,
    /// Number of assignments on the project, not distinct engineers.
    pub current_team_size: u32,
}

/// How many engineers hold a skill.
#[derive(Debug, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: u32,
}

/// Manager dashboard payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDashboard {
    pub department_utilization: u32,
    pub engineers: Vec<EngineerAllocation>,
    pub projects: Vec<ProjectStaffing>,
    pub skill_distribution: Vec<SkillCount>,
}

/// A project entry on the engineer dashboard. Dates are the
/// assignment's, not the project's.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedProject {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub role: String,
    pub allocation_percentage: u32,
}

/// Engineer dashboard payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerDashboard {
    pub id: Uuid,
    pub name: String,
    pub current_allocation: u32,
    pub max_capacity: u32,
    pub skills: Vec<String>,
    pub projects: Vec<AssignedProject>,
}

/// Builds the manager dashboard: department utilization, per-engineer
/// allocation, staffing of the manager's own projects, and the team's
/// skill counts in first-encounter order.
pub async fn manager_dashboard<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<ManagerDashboard>> {
    require_manager(&user)?;

    let engineers = state
        .store
        .list_users(UserFilter {
            role: Some(Role::Engineer),
            ..Default::default()
        })
        .await?;
    let today = chrono::Utc::now().date_naive();

    let utilization = department_utilization(&state.store).await?;

    let mut engineer_allocations = Vec::with_capacity(engineers.len());
    for engineer in &engineers {
        let current_allocation = allocated_capacity(&state.store, engineer.id, today).await?;
        engineer_allocations.push(EngineerAllocation {
            id: engineer.id,
            name: engineer.name.clone(),
            current_allocation,
            max_capacity: engineer.max_capacity(),
        });
    }

    let mut skill_distribution: Vec<SkillCount> = Vec::new();
    for engineer in &engineers {
        for skill in engineer.skills() {
            match skill_distribution.iter_mut().find(|entry| entry.skill == *skill) {
                Some(entry) => entry.count += 1,
                None => skill_distribution.push(SkillCount {
                    skill: skill.clone(),
                    count: 1,
                }),
            }
        }
    }

    let projects = state
        .store
        .list_projects(ProjectFilter {
            manager_id: Some(user.id),
            ..Default::default()
        })
        .await?;

    let mut staffing = Vec::with_capacity(projects.len());
    for project in projects {
        let assignments = state
            .store
            .find_assignments(AssignmentFilter {
                project_id: Some(project.id),
                ..Default::default()
            })
            .await?;
        staffing.push(ProjectStaffing {
            id: project.id,
            name: project.name,
            status: project.status,
            team_size: project.team_size,
            current_team_size: assignments.len() as u32,
        });
    }

    Ok(Json(ManagerDashboard {
        department_utilization: utilization,
        engineers: engineer_allocations,
        projects: staffing,
        skill_distribution,
    }))
}

/// Builds the engineer dashboard: the caller's own profile, current
/// allocation, and one project entry per assignment.
pub async fn engineer_dashboard<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<EngineerDashboard>> {
    require_engineer(&user)?;

    let engineer = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Engineer not found".to_string()))?;

    let assignments = state
        .store
        .find_assignments(AssignmentFilter {
            engineer_id: Some(user.id),
            ..Default::default()
        })
        .await?;

    let mut projects = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let Some(project) = state.store.get_project(assignment.project_id).await? else {
            continue;
        };
        projects.push(AssignedProject {
            id: project.id,
            name: project.name,
            description: project.description,
            start_date: assignment.start_date,
            end_date: assignment.end_date,
            role: assignment.role,
            allocation_percentage: assignment.allocation_percentage,
        });
    }

    let today = chrono::Utc::now().date_naive();
    let current_allocation = allocated_capacity(&state.store, user.id, today).await?;
    let max_capacity = engineer.max_capacity();
    let skills = engineer.skills().to_vec();

    Ok(Json(EngineerDashboard {
        id: engineer.id,
        name: engineer.name,
        current_allocation,
        max_capacity,
        skills,
        projects,
    }))
}
