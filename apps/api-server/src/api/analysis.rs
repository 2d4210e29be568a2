//! Skill analysis API endpoints.

use std::sync::Arc;

use allocation::{RankedEngineer, SkillDistribution, SkillGapReport, analyze_skill_gaps};
use axum::{
    Json,
    extract::{Path, State},
};
use resource_store::ResourceStore;
use uuid::Uuid;

use crate::error::ServerResult;
use crate::state::AppState;

/// Gets the skill gap analysis across active projects.
pub async fn skill_gaps<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<SkillGapReport>> {
    let report = analyze_skill_gaps(&state.store).await?;
    Ok(Json(report))
}

/// Gets the team-wide skill distribution.
pub async fn team_skills<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<SkillDistribution>>> {
    let distribution = allocation::team_skill_distribution(&state.store).await?;
    Ok(Json(distribution))
}

/// Ranks engineers against a project's required skills.
pub async fn recommended_engineers<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(project_id): Path<Uuid>,
) -> ServerResult<Json<Vec<RankedEngineer>>> {
    let recommendations =
        allocation::recommended_engineers_for_project(&state.store, project_id).await?;
    Ok(Json(recommendations))
}
