//! Engineer API endpoints.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use entities::{Role, User};
use resource_store::{ResourceStore, UserFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::middleware::{AuthenticatedUser, require_manager};
use crate::state::AppState;

/// Query parameters for listing engineers.
#[derive(Debug, Deserialize)]
pub struct ListEngineersQuery {
    pub department: Option<String>,
}

/// Query parameters for the capacity lookup.
#[derive(Debug, Deserialize)]
pub struct CapacityQuery {
    pub date: Option<NaiveDate>,
}

/// Capacity snapshot for one engineer on one day.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityResponse {
    pub engineer_id: Uuid,
    pub name: String,
    pub max_capacity: u32,
    pub available_capacity: i32,
    pub date: NaiveDate,
}

/// Lists engineers, sorted by name.
pub async fn list_engineers<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListEngineersQuery>,
) -> ServerResult<Json<Vec<User>>> {
    require_manager(&user)?;

    let mut engineers = state
        .store
        .list_users(UserFilter {
            role: Some(Role::Engineer),
            department: query.department,
        })
        .await?;
    engineers.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(engineers))
}

/// Gets an engineer's available capacity on a day, defaulting to today.
pub async fn get_capacity<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
    Query(query): Query<CapacityQuery>,
) -> ServerResult<Json<CapacityResponse>> {
    let engineer = state
        .store
        .get_user(id)
        .await?
        .filter(|user| user.is_engineer())
        .ok_or_else(|| ServerError::NotFound("Engineer not found".to_string()))?;

    let date = query
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let available_capacity = allocation::available_capacity(&state.store, id, Some(date)).await?;
    let max_capacity = engineer.max_capacity();

    Ok(Json(CapacityResponse {
        engineer_id: engineer.id,
        name: engineer.name,
        max_capacity,
        available_capacity,
        date,
    }))
}
