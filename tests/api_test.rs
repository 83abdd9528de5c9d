//! API-level tests: request DTO validation, error mapping, response
//! envelope, and wire formats for the domain enums.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use common::words;
use mentor_match::api::handlers::auth_handler::SignupRequest;
use mentor_match::api::handlers::request_handler::{RespondRequestRequest, SubmitRequestRequest};
use mentor_match::api::handlers::student_handler::CreateStudentProfileRequest;
use mentor_match::domain::{Capacity, Duration, RequestStatus, ResponseStatus, UserRole};
use mentor_match::errors::AppError;
use mentor_match::services::Claims;
use mentor_match::types::ApiResponse;

// =============================================================================
// Proposal validation
// =============================================================================

fn valid_submission() -> SubmitRequestRequest {
    SubmitRequestRequest {
        mentor_id: Uuid::new_v4(),
        project_title: "Campus energy dashboard".to_string(),
        description: words(50),
        team_size: 3,
        methodology: words(30),
        tech_stack: vec!["rust".to_string()],
        objectives: words(20),
        expected_outcome: words(20),
        duration: Duration::ThreeToFourMonths,
        additional_notes: None,
    }
}

#[test]
fn test_minimum_word_counts_are_accepted() {
    // Every long-text field sits exactly at its minimum
    assert!(valid_submission().validate().is_ok());
}

#[test]
fn test_49_word_description_is_rejected() {
    let mut payload = valid_submission();
    payload.description = words(49);
    assert!(payload.validate().is_err());
}

#[test]
fn test_29_word_methodology_is_rejected() {
    let mut payload = valid_submission();
    payload.methodology = words(29);
    assert!(payload.validate().is_err());
}

#[test]
fn test_19_word_objectives_is_rejected() {
    let mut payload = valid_submission();
    payload.objectives = words(19);
    assert!(payload.validate().is_err());
}

#[test]
fn test_empty_tech_stack_is_rejected() {
    let mut payload = valid_submission();
    payload.tech_stack = vec![];
    assert!(payload.validate().is_err());
}

#[test]
fn test_empty_title_is_rejected() {
    let mut payload = valid_submission();
    payload.project_title = String::new();
    assert!(payload.validate().is_err());
}

#[test]
fn test_team_size_bounds() {
    let mut payload = valid_submission();
    payload.team_size = 0;
    assert!(payload.validate().is_err());

    payload.team_size = 11;
    assert!(payload.validate().is_err());

    payload.team_size = 10;
    assert!(payload.validate().is_ok());
}

#[test]
fn test_respond_payload_never_accepts_pending() {
    // "pending" is a creation state, not a decision
    assert!(serde_json::from_str::<ResponseStatus>("\"pending\"").is_err());
    assert_eq!(
        serde_json::from_str::<ResponseStatus>("\"changes_requested\"").unwrap(),
        ResponseStatus::ChangesRequested
    );

    let payload: RespondRequestRequest =
        serde_json::from_str(r#"{"status": "approved", "feedback": "Great proposal"}"#).unwrap();
    assert_eq!(payload.status, ResponseStatus::Approved);
    assert!(payload.validate().is_ok());
}

// =============================================================================
// Signup and profile validation
// =============================================================================

#[test]
fn test_signup_payload_validation() {
    let valid = SignupRequest {
        name: "Jane Doe".to_string(),
        email: "jane.doe@university.edu".to_string(),
        password: "SecurePass123!".to_string(),
        role: UserRole::Student,
    };
    assert!(valid.validate().is_ok());

    let short_password = SignupRequest {
        password: "short".to_string(),
        ..valid_signup()
    };
    assert!(short_password.validate().is_err());

    let bad_email = SignupRequest {
        email: "not-an-email".to_string(),
        ..valid_signup()
    };
    assert!(bad_email.validate().is_err());
}

fn valid_signup() -> SignupRequest {
    SignupRequest {
        name: "Jane Doe".to_string(),
        email: "jane.doe@university.edu".to_string(),
        password: "SecurePass123!".to_string(),
        role: UserRole::Student,
    }
}

fn valid_student_profile() -> CreateStudentProfileRequest {
    CreateStudentProfileRequest {
        registration_no: "2141001".to_string(),
        year: 3,
        section: "B".to_string(),
        cgpa: 8.7,
        skills: vec!["rust".to_string()],
        interests: vec![],
        github: Some("https://github.com/janedoe".to_string()),
        linkedin: None,
        portfolio: None,
    }
}

#[test]
fn test_student_profile_validation() {
    assert!(valid_student_profile().validate().is_ok());

    let mut bad_year = valid_student_profile();
    bad_year.year = 6;
    assert!(bad_year.validate().is_err());

    let mut bad_cgpa = valid_student_profile();
    bad_cgpa.cgpa = 10.5;
    assert!(bad_cgpa.validate().is_err());

    let mut bad_github = valid_student_profile();
    bad_github.github = Some("not a url".to_string());
    assert!(bad_github.validate().is_err());
}

// =============================================================================
// Error mapping
// =============================================================================

#[test]
fn test_error_status_codes() {
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden.into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        AppError::NotFound.into_response().status(),
        StatusCode::NOT_FOUND
    );
    // Duplicates surface as 409, not 400
    assert_eq!(
        AppError::conflict("User").into_response().status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::validation("bad input").into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::internal("boom").into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

// =============================================================================
// Response envelope
// =============================================================================

#[test]
fn test_api_response_structure() {
    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[test]
fn test_api_response_with_message() {
    let response: ApiResponse<i32> = ApiResponse::with_message(42, "Operation completed");
    assert!(response.success);
    assert_eq!(response.data.unwrap(), 42);
    assert_eq!(response.message.unwrap(), "Operation completed");
}

#[test]
fn test_message_only_response() {
    let response: ApiResponse<()> = ApiResponse::message("Success");
    assert!(response.success);
    assert!(response.data.is_none());
    assert_eq!(response.message.unwrap(), "Success");
}

// =============================================================================
// Wire formats
// =============================================================================

#[test]
fn test_duration_wire_format() {
    assert_eq!(
        serde_json::to_string(&Duration::OneToTwoMonths).unwrap(),
        "\"1-2 months\""
    );
    assert_eq!(
        serde_json::from_str::<Duration>("\"1 year\"").unwrap(),
        Duration::OneYear
    );
    assert!(serde_json::from_str::<Duration>("\"2 years\"").is_err());
}

#[test]
fn test_capacity_wire_format() {
    assert_eq!(
        serde_json::to_string(&Capacity::LimitedSlots).unwrap(),
        "\"limited slots\""
    );
    assert_eq!(
        serde_json::from_str::<Capacity>("\"available\"").unwrap(),
        Capacity::Available
    );
}

#[test]
fn test_request_status_wire_format() {
    assert_eq!(
        serde_json::to_string(&RequestStatus::ChangesRequested).unwrap(),
        "\"changes_requested\""
    );
}

#[test]
fn test_claims_structure() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "jane.doe@university.edu".to_string(),
        role: "student".to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    assert!(!claims.email.is_empty());
    assert!(claims.exp > claims.iat);
    assert_eq!(UserRole::from(claims.role.as_str()), UserRole::Student);
}
