//! Project request entity and proposal validation helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle states of a project request.
///
/// A request is created as `pending`; every other state is set by the
/// addressed mentor. A later response may overwrite an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    ChangesRequested,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::ChangesRequested => "changes_requested",
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(s: &str) -> Self {
        match s {
            "approved" => RequestStatus::Approved,
            "rejected" => RequestStatus::Rejected,
            "changes_requested" => RequestStatus::ChangesRequested,
            _ => RequestStatus::Pending,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Statuses a mentor may set when responding.
///
/// `pending` is deliberately absent: it is the creation state, never a
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Approved,
    Rejected,
    ChangesRequested,
}

impl From<ResponseStatus> for RequestStatus {
    fn from(s: ResponseStatus) -> Self {
        match s {
            ResponseStatus::Approved => RequestStatus::Approved,
            ResponseStatus::Rejected => RequestStatus::Rejected,
            ResponseStatus::ChangesRequested => RequestStatus::ChangesRequested,
        }
    }
}

/// Expected project duration buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Duration {
    #[serde(rename = "1-2 months")]
    OneToTwoMonths,
    #[serde(rename = "3-4 months")]
    ThreeToFourMonths,
    #[serde(rename = "6 months")]
    SixMonths,
    #[serde(rename = "1 year")]
    OneYear,
}

impl Duration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Duration::OneToTwoMonths => "1-2 months",
            Duration::ThreeToFourMonths => "3-4 months",
            Duration::SixMonths => "6 months",
            Duration::OneYear => "1 year",
        }
    }
}

impl From<&str> for Duration {
    fn from(s: &str) -> Self {
        match s {
            "1-2 months" => Duration::OneToTwoMonths,
            "3-4 months" => Duration::ThreeToFourMonths,
            "1 year" => Duration::OneYear,
            _ => Duration::SixMonths,
        }
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project request domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub project_title: String,
    pub description: String,
    pub team_size: i16,
    pub methodology: String,
    pub tech_stack: Vec<String>,
    pub objectives: String,
    pub expected_outcome: String,
    pub duration: Duration,
    pub additional_notes: Option<String>,
    pub status: RequestStatus,
    pub mentor_feedback: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRequest {
    /// Whether the given user is a party to this request
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.student_id == user_id || self.mentor_id == user_id
    }
}

/// Fields for creating a project request (validated upstream)
#[derive(Debug, Clone)]
pub struct NewProjectRequest {
    pub mentor_id: Uuid,
    pub project_title: String,
    pub description: String,
    pub team_size: i16,
    pub methodology: String,
    pub tech_stack: Vec<String>,
    pub objectives: String,
    pub expected_outcome: String,
    pub duration: Duration,
    pub additional_notes: Option<String>,
}

/// Summary of the submitting student attached to a mentor's inbox rows.
///
/// The request itself stores none of these fields; they are resolved from
/// the student's profile at read time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentSummary {
    pub name: String,
    pub registration_no: String,
    pub year: i16,
    pub section: String,
    pub cgpa: f64,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub github: Option<String>,
}

/// A request joined with its submitting student, as seen by the mentor
#[derive(Debug, Clone, Serialize)]
pub struct MentorRequestView {
    pub request: ProjectRequest,
    /// Absent when the student has not filled in a profile yet
    pub student: Option<StudentSummary>,
}

/// Count words the way proposal length limits are defined: contiguous
/// non-whitespace runs.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Project request response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    #[schema(example = "Campus energy dashboard")]
    pub project_title: String,
    pub description: String,
    pub team_size: i16,
    pub methodology: String,
    pub tech_stack: Vec<String>,
    pub objectives: String,
    pub expected_outcome: String,
    #[schema(example = "3-4 months")]
    pub duration: String,
    pub additional_notes: Option<String>,
    #[schema(example = "pending")]
    pub status: RequestStatus,
    pub mentor_feedback: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRequest> for RequestResponse {
    fn from(r: ProjectRequest) -> Self {
        Self {
            id: r.id,
            student_id: r.student_id,
            mentor_id: r.mentor_id,
            project_title: r.project_title,
            description: r.description,
            team_size: r.team_size,
            methodology: r.methodology,
            tech_stack: r.tech_stack,
            objectives: r.objectives,
            expected_outcome: r.expected_outcome,
            duration: r.duration.to_string(),
            additional_notes: r.additional_notes,
            status: r.status,
            mentor_feedback: r.mentor_feedback,
            responded_at: r.responded_at,
            created_at: r.created_at,
        }
    }
}

/// Mentor inbox row response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MentorRequestResponse {
    #[serde(flatten)]
    pub request: RequestResponse,
    pub student: Option<StudentSummary>,
}

impl From<MentorRequestView> for MentorRequestResponse {
    fn from(v: MentorRequestView) -> Self {
        Self {
            request: v.request.into(),
            student: v.student,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("a  b\tc\nd"), 4);
    }

    #[test]
    fn test_status_round_trip() {
        for s in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::ChangesRequested,
        ] {
            assert_eq!(RequestStatus::from(s.as_str()), s);
        }
    }

    #[test]
    fn test_response_status_never_pending() {
        assert_eq!(
            RequestStatus::from(ResponseStatus::Approved),
            RequestStatus::Approved
        );
        assert_eq!(
            RequestStatus::from(ResponseStatus::ChangesRequested),
            RequestStatus::ChangesRequested
        );
    }

    #[test]
    fn test_duration_strings() {
        assert_eq!(Duration::OneToTwoMonths.as_str(), "1-2 months");
        assert_eq!(Duration::from("1 year"), Duration::OneYear);
    }

    #[test]
    fn test_involves() {
        let student = Uuid::new_v4();
        let mentor = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let request = ProjectRequest {
            id: Uuid::new_v4(),
            student_id: student,
            mentor_id: mentor,
            project_title: "t".into(),
            description: "d".into(),
            team_size: 2,
            methodology: "m".into(),
            tech_stack: vec!["rust".into()],
            objectives: "o".into(),
            expected_outcome: "e".into(),
            duration: Duration::SixMonths,
            additional_notes: None,
            status: RequestStatus::Pending,
            mentor_feedback: None,
            responded_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        assert!(request.involves(student));
        assert!(request.involves(mentor));
        assert!(!request.involves(outsider));
    }
}
