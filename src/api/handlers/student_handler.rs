//! Student profile handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_student, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    NewStudentProfile, StudentDirectoryEntry, StudentProfileResponse, StudentProfileUpdate,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, NoContent};

static REGISTRATION_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{4,20}$").expect("valid registration number regex"));

/// Create a student profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentProfileRequest {
    /// University registration number (unique)
    #[validate(regex(path = *REGISTRATION_NO_RE, message = "Registration number format is invalid"))]
    #[schema(example = "2141001")]
    pub registration_no: String,
    /// Current year of study
    #[validate(range(min = 1, max = 5, message = "Year must be between 1 and 5"))]
    #[schema(example = 3)]
    pub year: i16,
    /// Class section
    #[validate(length(min = 1, max = 8, message = "Section is required"))]
    #[schema(example = "B")]
    pub section: String,
    /// Cumulative grade point average
    #[validate(range(min = 0.0, max = 10.0, message = "CGPA must be between 0 and 10"))]
    #[schema(example = 8.7)]
    pub cgpa: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// GitHub profile URL
    #[validate(url(message = "GitHub link must be a valid URL"))]
    pub github: Option<String>,
    /// LinkedIn profile URL
    #[validate(url(message = "LinkedIn link must be a valid URL"))]
    pub linkedin: Option<String>,
    /// Portfolio URL
    #[validate(url(message = "Portfolio link must be a valid URL"))]
    pub portfolio: Option<String>,
}

impl From<CreateStudentProfileRequest> for NewStudentProfile {
    fn from(r: CreateStudentProfileRequest) -> Self {
        Self {
            registration_no: r.registration_no,
            year: r.year,
            section: r.section,
            cgpa: r.cgpa,
            skills: r.skills,
            interests: r.interests,
            github: r.github,
            linkedin: r.linkedin,
            portfolio: r.portfolio,
        }
    }
}

/// Partially update a student profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentProfileRequest {
    #[validate(range(min = 1, max = 5, message = "Year must be between 1 and 5"))]
    pub year: Option<i16>,
    #[validate(length(min = 1, max = 8, message = "Section is required"))]
    pub section: Option<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "CGPA must be between 0 and 10"))]
    pub cgpa: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    #[validate(url(message = "GitHub link must be a valid URL"))]
    pub github: Option<String>,
    #[validate(url(message = "LinkedIn link must be a valid URL"))]
    pub linkedin: Option<String>,
    #[validate(url(message = "Portfolio link must be a valid URL"))]
    pub portfolio: Option<String>,
}

impl From<UpdateStudentProfileRequest> for StudentProfileUpdate {
    fn from(r: UpdateStudentProfileRequest) -> Self {
        Self {
            year: r.year,
            section: r.section,
            cgpa: r.cgpa,
            skills: r.skills,
            interests: r.interests,
            github: r.github,
            linkedin: r.linkedin,
            portfolio: r.portfolio,
        }
    }
}

/// Student directory row
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDirectoryResponse {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane.doe@university.edu")]
    pub email: String,
    pub profile: StudentProfileResponse,
}

impl From<StudentDirectoryEntry> for StudentDirectoryResponse {
    fn from(e: StudentDirectoryEntry) -> Self {
        Self {
            name: e.name,
            email: e.email,
            profile: e.profile.into(),
        }
    }
}

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(get_own_profile)
                .post(create_profile)
                .patch(update_profile)
                .delete(delete_profile),
        )
        .route("/profile/:id", get(get_profile))
        .route("/", get(list_students))
}

/// Create the caller's student profile
#[utoipa::path(
    post,
    path = "/students/profile",
    tag = "Students",
    request_body = CreateStudentProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Profile created", body = StudentProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not a student"),
        (status = 409, description = "Profile or registration number already exists")
    )
)]
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateStudentProfileRequest>,
) -> AppResult<Created<StudentProfileResponse>> {
    require_student(&user)?;

    let profile = state
        .student_profile_service
        .create(user.id, payload.into())
        .await?;

    Ok(Created(StudentProfileResponse::from(profile)))
}

/// Get the caller's own student profile
#[utoipa::path(
    get,
    path = "/students/profile",
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's profile", body = StudentProfileResponse),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<StudentProfileResponse>>> {
    require_student(&user)?;

    let profile = state.student_profile_service.get_own(user.id).await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// Partially update the caller's student profile
#[utoipa::path(
    patch,
    path = "/students/profile",
    tag = "Students",
    request_body = UpdateStudentProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated profile", body = StudentProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateStudentProfileRequest>,
) -> AppResult<Json<ApiResponse<StudentProfileResponse>>> {
    require_student(&user)?;

    let profile = state
        .student_profile_service
        .update(user.id, payload.into())
        .await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// Delete the caller's student profile
#[utoipa::path(
    delete,
    path = "/students/profile",
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "No profile to delete")
    )
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<NoContent> {
    require_student(&user)?;

    state.student_profile_service.delete(user.id).await?;

    Ok(NoContent)
}

/// Get a student profile by ID
#[utoipa::path(
    get,
    path = "/students/profile/{id}",
    tag = "Students",
    params(("id" = Uuid, Path, description = "Profile ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The profile", body = StudentProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StudentProfileResponse>>> {
    let profile = state.student_profile_service.get(id).await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// List all students with their profiles
#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Student directory", body = [StudentDirectoryResponse])
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<StudentDirectoryResponse>>>> {
    let students = state.student_profile_service.list().await?;

    Ok(Json(ApiResponse::success(
        students.into_iter().map(Into::into).collect(),
    )))
}
