//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, notification_handler, request_handler, student_handler, teacher_handler,
};
use crate::domain::{
    Capacity, Duration, FacultyProfileResponse, NotificationData, NotificationKind,
    NotificationResponse, RequestResponse, RequestStatus, ResponseStatus, StudentProfileResponse,
    StudentSummary, UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::PaginationMeta;

/// OpenAPI documentation for Mentor Match
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mentor Match API",
        version = "0.1.0",
        description = "Student/faculty mentorship platform: profiles, project requests, notifications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::send_otp,
        auth_handler::verify_otp,
        auth_handler::signup,
        auth_handler::signin,
        // Student endpoints
        student_handler::create_profile,
        student_handler::get_own_profile,
        student_handler::update_profile,
        student_handler::delete_profile,
        student_handler::get_profile,
        student_handler::list_students,
        // Mentor endpoints
        teacher_handler::create_profile,
        teacher_handler::get_own_profile,
        teacher_handler::update_profile,
        teacher_handler::get_profile,
        teacher_handler::list_mentors,
        // Request endpoints
        request_handler::submit_request,
        request_handler::list_for_student,
        request_handler::list_for_mentor,
        request_handler::get_request,
        request_handler::respond_request,
        // Notification endpoints
        notification_handler::list,
        notification_handler::unread_count,
        notification_handler::mark_read,
        notification_handler::mark_all_read,
        notification_handler::delete_notification,
        notification_handler::clear_read,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            Capacity,
            StudentProfileResponse,
            FacultyProfileResponse,
            Duration,
            RequestStatus,
            ResponseStatus,
            RequestResponse,
            StudentSummary,
            NotificationKind,
            NotificationData,
            NotificationResponse,
            PaginationMeta,
            // Auth types
            auth_handler::SendOtpRequest,
            auth_handler::VerifyOtpRequest,
            auth_handler::SignupRequest,
            auth_handler::SigninRequest,
            TokenResponse,
            // Profile handler types
            student_handler::CreateStudentProfileRequest,
            student_handler::UpdateStudentProfileRequest,
            student_handler::StudentDirectoryResponse,
            teacher_handler::CreateFacultyProfileRequest,
            teacher_handler::UpdateFacultyProfileRequest,
            teacher_handler::MentorDirectoryResponse,
            // Request handler types
            request_handler::SubmitRequestRequest,
            request_handler::RespondRequestRequest,
            crate::domain::MentorRequestResponse,
            // Notification handler types
            notification_handler::NotificationListResponse,
            notification_handler::UnreadCountResponse,
            notification_handler::BulkResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, signin, and email verification"),
        (name = "Students", description = "Student profiles and directory"),
        (name = "Mentors", description = "Faculty profiles and mentor directory"),
        (name = "Requests", description = "Project request lifecycle"),
        (name = "Notifications", description = "Per-user notification inbox")
    )
)]
pub struct ApiDoc;

/// Adds the bearer token security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
