//! Authentication middleware.

use std::sync::Arc;

use auth::{Claims, JwtManager};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use entities::Role;
use resource_store::ResourceStore;
use serde_json::json;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Authenticated user information.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// User display name.
    pub name: String,
    /// Role the token was issued for.
    pub role: Role,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = auth::AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}

/// Extracts the JWT token from the Authorization header.
fn extract_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Validates a JWT token and returns the claims.
fn validate_token(jwt_manager: &JwtManager, token: &str) -> Result<Claims, StatusCode> {
    jwt_manager
        .validate_token(token)
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Authentication middleware.
///
/// This middleware extracts the JWT token from the Authorization header,
/// validates it, and stores the authenticated user in the request extensions.
pub async fn auth_middleware<S: ResourceStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract and validate token
    let token = match extract_token(&request) {
        Some(token) => token,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Missing authorization header" })),
            )
                .into_response()
        }
    };

    let claims = match validate_token(&state.jwt_manager, token) {
        Ok(claims) => claims,
        Err(status) => {
            return (status, Json(json!({ "error": "Invalid token" }))).into_response()
        }
    };

    // Store authenticated user in request extensions
    match AuthenticatedUser::try_from(claims) {
        Ok(user) => {
            request.extensions_mut().insert(user);
        }
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid token claims" })),
            )
                .into_response()
        }
    }

    next.run(request).await
}

/// Requires the authenticated user to hold the manager role.
pub fn require_manager(user: &AuthenticatedUser) -> ServerResult<()> {
    if user.role != Role::Manager {
        return Err(ServerError::PermissionDenied("Access denied".to_string()));
    }
    Ok(())
}

/// Requires the authenticated user to hold the engineer role.
pub fn require_engineer(user: &AuthenticatedUser) -> ServerResult<()> {
    if user.role != Role::Engineer {
        return Err(ServerError::PermissionDenied("Access denied".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_user_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(
            user_id,
            "test@example.com".to_string(),
            "Test User".to_string(),
            Role::Manager,
            24,
        );

        let user = AuthenticatedUser::try_from(claims).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, "Test User");
        assert_eq!(user.role, Role::Manager);
    }

    fn request_with_auth(value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/projects");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token_requires_bearer_scheme() {
        let request = request_with_auth(Some("Bearer test-token-123"));
        assert_eq!(extract_token(&request), Some("test-token-123"));

        let request = request_with_auth(Some("Basic credentials"));
        assert_eq!(extract_token(&request), None);

        let request = request_with_auth(None);
        assert_eq!(extract_token(&request), None);
    }

    #[test]
    fn test_role_guards() {
        let manager = AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "mgr@example.com".to_string(),
            name: "Manager".to_string(),
            role: Role::Manager,
        };
        let engineer = AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "eng@example.com".to_string(),
            name: "Engineer".to_string(),
            role: Role::Engineer,
        };

        assert!(require_manager(&manager).is_ok());
        assert!(require_engineer(&engineer).is_ok());
        assert!(matches!(
            require_manager(&engineer),
            Err(ServerError::PermissionDenied(_))
        ));
        assert!(matches!(
            require_engineer(&manager),
            Err(ServerError::PermissionDenied(_))
        ));
    }
}
