//! Project request handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_student, require_teacher, CurrentUser};
use crate::api::AppState;
use crate::config::{MIN_DESCRIPTION_WORDS, MIN_METHODOLOGY_WORDS, MIN_OBJECTIVE_WORDS};
use crate::domain::{
    word_count, Duration, MentorRequestResponse, NewProjectRequest, RequestResponse,
    ResponseStatus,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

fn min_words(value: &str, min: usize, what: &str) -> Result<(), ValidationError> {
    if word_count(value) < min {
        let mut err = ValidationError::new("min_words");
        err.message = Some(format!("{} must be at least {} words", what, min).into());
        return Err(err);
    }
    Ok(())
}

fn validate_description(value: &str) -> Result<(), ValidationError> {
    min_words(value, MIN_DESCRIPTION_WORDS, "Description")
}

fn validate_methodology(value: &str) -> Result<(), ValidationError> {
    min_words(value, MIN_METHODOLOGY_WORDS, "Methodology")
}

fn validate_objectives(value: &str) -> Result<(), ValidationError> {
    min_words(value, MIN_OBJECTIVE_WORDS, "Objectives")
}

fn validate_expected_outcome(value: &str) -> Result<(), ValidationError> {
    min_words(value, MIN_OBJECTIVE_WORDS, "Expected outcome")
}

/// Submit a project proposal to a mentor
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitRequestRequest {
    /// The mentor being proposed to
    pub mentor_id: Uuid,
    /// Short project title
    #[validate(length(min = 1, message = "Project title is required"))]
    #[schema(example = "Campus energy dashboard")]
    pub project_title: String,
    /// What the project is about (at least 50 words)
    #[validate(custom(function = validate_description))]
    pub description: String,
    /// Number of students on the project
    #[validate(range(min = 1, max = 10, message = "Team size must be between 1 and 10"))]
    #[schema(example = 3)]
    pub team_size: i16,
    /// How the work will be carried out (at least 30 words)
    #[validate(custom(function = validate_methodology))]
    pub methodology: String,
    /// Technologies the team intends to use
    #[validate(length(min = 1, message = "At least one tech stack entry is required"))]
    #[schema(example = json!(["rust", "postgres"]))]
    pub tech_stack: Vec<String>,
    /// What the project sets out to achieve (at least 20 words)
    #[validate(custom(function = validate_objectives))]
    pub objectives: String,
    /// What exists when the project is done (at least 20 words)
    #[validate(custom(function = validate_expected_outcome))]
    pub expected_outcome: String,
    /// Expected duration bucket
    #[schema(example = "3-4 months")]
    pub duration: Duration,
    /// Anything else the mentor should know
    pub additional_notes: Option<String>,
}

impl From<SubmitRequestRequest> for NewProjectRequest {
    fn from(r: SubmitRequestRequest) -> Self {
        Self {
            mentor_id: r.mentor_id,
            project_title: r.project_title,
            description: r.description,
            team_size: r.team_size,
            methodology: r.methodology,
            tech_stack: r.tech_stack,
            objectives: r.objectives,
            expected_outcome: r.expected_outcome,
            duration: r.duration,
            additional_notes: r.additional_notes,
        }
    }
}

/// Record a decision on a request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RespondRequestRequest {
    /// The decision
    #[schema(example = "approved")]
    pub status: ResponseStatus,
    /// Optional feedback for the student
    #[validate(length(max = 2000, message = "Feedback is too long"))]
    pub feedback: Option<String>,
}

/// Create project request routes
pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_request))
        .route("/student", get(list_for_student))
        .route("/mentor", get(list_for_mentor))
        .route("/:id", get(get_request).patch(respond_request))
}

/// Submit a project proposal
#[utoipa::path(
    post,
    path = "/requests",
    tag = "Requests",
    request_body = SubmitRequestRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Request submitted", body = RequestResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not a student"),
        (status = 404, description = "Mentor not found"),
        (status = 409, description = "A pending request to this mentor already exists")
    )
)]
pub async fn submit_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<SubmitRequestRequest>,
) -> AppResult<Created<RequestResponse>> {
    require_student(&user)?;

    let request = state.request_service.submit(user.id, payload.into()).await?;

    Ok(Created(RequestResponse::from(request)))
}

/// The caller's own submissions
#[utoipa::path(
    get,
    path = "/requests/student",
    tag = "Requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Submitted requests, newest first", body = [RequestResponse]),
        (status = 403, description = "Caller is not a student")
    )
)]
pub async fn list_for_student(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<RequestResponse>>>> {
    require_student(&user)?;

    let requests = state.request_service.list_for_student(user.id).await?;

    Ok(Json(ApiResponse::success(
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// The caller's mentor inbox, annotated with student profiles
#[utoipa::path(
    get,
    path = "/requests/mentor",
    tag = "Requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Received requests, newest first", body = [MentorRequestResponse]),
        (status = 403, description = "Caller is not a teacher")
    )
)]
pub async fn list_for_mentor(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<MentorRequestResponse>>>> {
    require_teacher(&user)?;

    let requests = state.request_service.list_for_mentor(user.id).await?;

    Ok(Json(ApiResponse::success(
        requests.into_iter().map(Into::into).collect(),
    )))
}

/// Get a request visible to its student or mentor
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The request", body = RequestResponse),
        (status = 403, description = "Caller is not a party to the request"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RequestResponse>>> {
    let request = state.request_service.get(user.id, id).await?;

    Ok(Json(ApiResponse::success(request.into())))
}

/// Approve, reject, or request changes to a request
#[utoipa::path(
    patch,
    path = "/requests/{id}",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = RespondRequestRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated request", body = RequestResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not the addressed mentor"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn respond_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RespondRequestRequest>,
) -> AppResult<Json<ApiResponse<RequestResponse>>> {
    require_teacher(&user)?;

    let request = state
        .request_service
        .respond(user.id, id, payload.status, payload.feedback)
        .await?;

    Ok(Json(ApiResponse::with_message(
        request.into(),
        "Response recorded",
    )))
}
