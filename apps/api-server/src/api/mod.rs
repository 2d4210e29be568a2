//! API endpoints.

pub mod analysis;
pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod engineers;
pub mod projects;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use resource_store::ResourceStore;

use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Creates the API router with all endpoints.
///
/// Everything except registration, login, and the health check sits
/// behind the authentication middleware.
pub fn create_router<S: ResourceStore + 'static>(
    state: Arc<AppState<S>>,
) -> Router<Arc<AppState<S>>> {
    let protected = Router::new()
        // Auth endpoints
        .route("/api/auth/profile", get(auth::get_profile))
        // Engineer endpoints
        .route("/api/engineers", get(engineers::list_engineers))
        .route("/api/engineers/:id/capacity", get(engineers::get_capacity))
        // Project endpoints
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/api/projects/:id", get(projects::get_project))
        .route(
            "/api/projects/:id/suitable-engineers",
            get(projects::suitable_engineers),
        )
        // Assignment endpoints
        .route(
            "/api/assignments",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route(
            "/api/assignments/:id",
            delete(assignments::delete_assignment).put(assignments::update_assignment),
        )
        // Dashboard endpoints
        .route("/api/dashboard/manager", get(dashboard::manager_dashboard))
        .route("/api/dashboard/engineer", get(dashboard::engineer_dashboard))
        // Analysis endpoints
        .route("/api/analysis/skill-gaps", get(analysis::skill_gaps))
        .route("/api/analysis/team-skills", get(analysis::team_skills))
        .route(
            "/api/analysis/recommended-engineers/:project_id",
            get(analysis::recommended_engineers),
        )
        .route_layer(from_fn_with_state(state, auth_middleware::<S>));

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
