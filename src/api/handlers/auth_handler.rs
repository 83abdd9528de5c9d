//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{UserResponse, UserRole};
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::{ApiResponse, Created};

/// Request a signup verification code
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendOtpRequest {
    /// University email address to verify
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@university.edu")]
    pub email: String,
}

/// Exchange a verification code for a verified email
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequest {
    /// Email the code was sent to
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@university.edu")]
    pub email: String,
    /// The 6-digit code from the email
    #[validate(length(equal = 6, message = "Verification code must be 6 digits"))]
    #[schema(example = "482916")]
    pub code: String,
}

/// User signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Verified university email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@university.edu")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Account role
    #[schema(example = "student")]
    pub role: UserRole,
}

/// User signin request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@university.edu")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

/// Send a verification code to a university email
#[utoipa::path(
    post,
    path = "/auth/send-otp",
    tag = "Authentication",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Verification code sent"),
        (status = 400, description = "Invalid or non-university email"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn send_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendOtpRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.auth_service.send_otp(payload.email).await?;

    Ok(Json(ApiResponse::message("Verification code sent")))
}

/// Verify an emailed code
#[utoipa::path(
    post,
    path = "/auth/verify-otp",
    tag = "Authentication",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Email verified"),
        (status = 400, description = "Invalid or expired code")
    )
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyOtpRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .auth_service
        .verify_otp(payload.email, payload.code)
        .await?;

    Ok(Json(ApiResponse::message("Email verified")))
}

/// Create an account for a verified email
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error or unverified email"),
        (status = 409, description = "Account already exists")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .auth_service
        .signup(payload.name, payload.email, payload.password, payload.role)
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Sign in and get a JWT token
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "Authentication",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signin successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SigninRequest>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    let token = state
        .auth_service
        .signin(payload.email, payload.password)
        .await?;

    Ok(Json(ApiResponse::success(token)))
}
