//! Faculty profile and mentor directory handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_teacher, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    Capacity, FacultyProfileResponse, FacultyProfileUpdate, MentorDirectoryEntry, MentorFilter,
    NewFacultyProfile,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Create a faculty profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacultyProfileRequest {
    /// Academic designation
    #[validate(length(min = 1, message = "Designation is required"))]
    #[schema(example = "Assistant Professor")]
    pub designation: String,
    /// Availability tier for new mentees
    #[schema(example = "available")]
    pub capacity: Capacity,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl From<CreateFacultyProfileRequest> for NewFacultyProfile {
    fn from(r: CreateFacultyProfileRequest) -> Self {
        Self {
            designation: r.designation,
            capacity: r.capacity,
            skills: r.skills,
            interests: r.interests,
        }
    }
}

/// Partially update a faculty profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFacultyProfileRequest {
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: Option<String>,
    pub capacity: Option<Capacity>,
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

impl From<UpdateFacultyProfileRequest> for FacultyProfileUpdate {
    fn from(r: UpdateFacultyProfileRequest) -> Self {
        Self {
            designation: r.designation,
            capacity: r.capacity,
            skills: r.skills,
            interests: r.interests,
        }
    }
}

/// Mentor directory filters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct MentorSearchQuery {
    /// Only mentors at this availability tier
    pub capacity: Option<Capacity>,
    /// Only mentors whose skills contain this substring
    pub skill: Option<String>,
}

/// Mentor directory row
#[derive(Debug, Serialize, ToSchema)]
pub struct MentorDirectoryResponse {
    #[schema(example = "Dr. Rao")]
    pub name: String,
    #[schema(example = "rao@university.edu")]
    pub email: String,
    pub profile: FacultyProfileResponse,
}

impl From<MentorDirectoryEntry> for MentorDirectoryResponse {
    fn from(e: MentorDirectoryEntry) -> Self {
        Self {
            name: e.name,
            email: e.email,
            profile: e.profile.into(),
        }
    }
}

/// Create teacher routes
pub fn teacher_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(get_own_profile).post(create_profile).patch(update_profile),
        )
        .route("/profile/:id", get(get_profile))
        .route("/", get(list_mentors))
}

/// Create the caller's faculty profile
#[utoipa::path(
    post,
    path = "/mentors/profile",
    tag = "Mentors",
    request_body = CreateFacultyProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Profile created", body = FacultyProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 409, description = "Profile already exists")
    )
)]
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateFacultyProfileRequest>,
) -> AppResult<Created<FacultyProfileResponse>> {
    require_teacher(&user)?;

    let profile = state
        .faculty_profile_service
        .create(user.id, payload.into())
        .await?;

    Ok(Created(FacultyProfileResponse::from(profile)))
}

/// Get the caller's own faculty profile
#[utoipa::path(
    get,
    path = "/mentors/profile",
    tag = "Mentors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's profile", body = FacultyProfileResponse),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<FacultyProfileResponse>>> {
    require_teacher(&user)?;

    let profile = state.faculty_profile_service.get_own(user.id).await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// Partially update the caller's faculty profile
#[utoipa::path(
    patch,
    path = "/mentors/profile",
    tag = "Mentors",
    request_body = UpdateFacultyProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated profile", body = FacultyProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateFacultyProfileRequest>,
) -> AppResult<Json<ApiResponse<FacultyProfileResponse>>> {
    require_teacher(&user)?;

    let profile = state
        .faculty_profile_service
        .update(user.id, payload.into())
        .await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// Get a faculty profile by ID
#[utoipa::path(
    get,
    path = "/mentors/profile/{id}",
    tag = "Mentors",
    params(("id" = Uuid, Path, description = "Profile ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The profile", body = FacultyProfileResponse),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FacultyProfileResponse>>> {
    let profile = state.faculty_profile_service.get(id).await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// Browse the mentor directory
#[utoipa::path(
    get,
    path = "/mentors",
    tag = "Mentors",
    params(MentorSearchQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Mentor directory", body = [MentorDirectoryResponse])
    )
)]
pub async fn list_mentors(
    State(state): State<AppState>,
    Query(query): Query<MentorSearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<MentorDirectoryResponse>>>> {
    let filter = MentorFilter {
        capacity: query.capacity,
        skill: query.skill,
    };

    let mentors = state.faculty_profile_service.search(filter).await?;

    Ok(Json(ApiResponse::success(
        mentors.into_iter().map(Into::into).collect(),
    )))
}
