//! JWT authentication middleware and role guards.
//!
//! Role and ownership checks recur on almost every endpoint; handlers call
//! the guards here instead of re-implementing them inline.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Check if user is a teacher.
    pub fn is_teacher(&self) -> bool {
        self.role.is_teacher()
    }

    /// Check if user is a student.
    pub fn is_student(&self) -> bool {
        self.role.is_student()
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: UserRole::from(claims.role.as_str()),
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require teacher role, returns Forbidden error otherwise.
pub fn require_teacher(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_teacher() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require student role, returns Forbidden error otherwise.
pub fn require_student(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_student() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
