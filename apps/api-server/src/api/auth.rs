//! Authentication API endpoints.

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use entities::{EmploymentType, RoleProfile, User};
use resource_store::ResourceStore;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Registration request body.
///
/// The `role` field selects the profile variant: engineers must supply
/// `seniority` and `skills`, managers supply neither.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub department: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
    pub employment_type: Option<EmploymentType>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the user it was issued for.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Registers a new user and returns a signed token for it.
pub async fn register<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<RegisterRequest>,
) -> ServerResult<(StatusCode, Json<AuthResponse>)> {
    if request.password.is_empty() {
        return Err(ServerError::InvalidRequest(
            "Password is required".to_string(),
        ));
    }

    let mut user = User::new(
        request.email,
        auth::hash_password(&request.password),
        request.name,
        request.department,
        request.profile,
    );
    if let Some(employment_type) = request.employment_type {
        user = user.with_employment_type(employment_type);
    }

    let user = state.store.create_user(user).await?;

    let token = state.jwt_manager.generate_token(
        user.id,
        user.email.clone(),
        user.name.clone(),
        user.role(),
    )?;

    tracing::info!(user_id = %user.id, role = %user.role(), "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// Verifies credentials and returns a signed token.
pub async fn login<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<AuthResponse>> {
    let user = state
        .store
        .get_user_by_email(&request.email)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    if !auth::verify_password(&request.password, &user.password_hash)? {
        return Err(ServerError::InvalidCredentials);
    }

    let token = state.jwt_manager.generate_token(
        user.id,
        user.email.clone(),
        user.name.clone(),
        user.role(),
    )?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse { token, user }))
}

/// Gets the current authenticated user, fresh from the store.
pub async fn get_profile<S: ResourceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<User>> {
    let user = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
