//! Notification entity for the per-user inbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::request::RequestStatus;

/// Notification categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    RequestApproved,
    RequestRejected,
    RequestChanges,
    General,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::RequestApproved => "request_approved",
            NotificationKind::RequestRejected => "request_rejected",
            NotificationKind::RequestChanges => "request_changes",
            NotificationKind::General => "general",
        }
    }

    /// Kind announcing the given response status to the student
    pub fn for_status(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Approved => NotificationKind::RequestApproved,
            RequestStatus::Rejected => NotificationKind::RequestRejected,
            RequestStatus::ChangesRequested => NotificationKind::RequestChanges,
            RequestStatus::Pending => NotificationKind::General,
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(s: &str) -> Self {
        match s {
            "request_approved" => NotificationKind::RequestApproved,
            "request_rejected" => NotificationKind::RequestRejected,
            "request_changes" => NotificationKind::RequestChanges,
            _ => NotificationKind::General,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured context attached to a notification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Notification domain entity.
///
/// `read` only ever moves from false to true; the only way out of the inbox
/// is deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub data: NotificationData,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a notification
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: NotificationData,
}

/// Notification response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    #[schema(example = "request_approved")]
    pub kind: NotificationKind,
    #[schema(example = "Request approved")]
    pub title: String,
    pub message: String,
    pub read: bool,
    pub data: NotificationData,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind,
            title: n.title,
            message: n.message,
            read: n.read,
            data: n.data,
            created_at: n.created_at,
        }
    }
}
