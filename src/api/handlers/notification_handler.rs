//! Notification inbox handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, patch},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::domain::NotificationResponse;
use crate::errors::AppResult;
use crate::services::{NotificationPage, NotificationQuery};
use crate::types::{ApiResponse, NoContent, PaginationMeta};

/// Inbox listing query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// 1-indexed page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size (capped server-side)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Only unread notifications
    #[serde(default)]
    pub unread_only: bool,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// One page of the inbox
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub meta: PaginationMeta,
    /// Unread notifications for the caller, regardless of filters
    pub unread: u64,
}

impl From<NotificationPage> for NotificationListResponse {
    fn from(page: NotificationPage) -> Self {
        Self {
            meta: PaginationMeta::new(page.page, page.limit, page.total),
            unread: page.unread,
            notifications: page.notifications.into_iter().map(Into::into).collect(),
        }
    }
}

/// Unread counter
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    #[schema(example = 3)]
    pub unread: u64,
}

/// Result of a bulk inbox operation
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkResponse {
    /// Rows the operation touched
    #[schema(example = 5)]
    pub affected: u64,
}

/// Create notification routes
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/unread-count", get(unread_count))
        .route("/:id/read", patch(mark_read))
        .route("/mark-all-read", patch(mark_all_read))
        .route("/:id", delete(delete_notification))
        .route("/clear/read", delete(clear_read))
}

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    params(ListQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "One page of the inbox", body = NotificationListResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<NotificationListResponse>>> {
    let page = state
        .notification_service
        .list(
            user.id,
            NotificationQuery {
                page: query.page,
                limit: query.limit,
                unread_only: query.unread_only,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(page.into())))
}

/// Count the caller's unread notifications
#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse)
    )
)]
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UnreadCountResponse>>> {
    let unread = state.notification_service.unread_count(user.id).await?;

    Ok(Json(ApiResponse::success(UnreadCountResponse { unread })))
}

/// Mark one notification as read (idempotent)
#[utoipa::path(
    patch,
    path = "/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "Notification ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The notification, now read", body = NotificationResponse),
        (status = 404, description = "Not found or not owned by the caller")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<NotificationResponse>>> {
    let notification = state.notification_service.mark_read(user.id, id).await?;

    Ok(Json(ApiResponse::success(notification.into())))
}

/// Mark every unread notification as read
#[utoipa::path(
    patch,
    path = "/notifications/mark-all-read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "How many were flipped", body = BulkResponse)
    )
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<BulkResponse>>> {
    let affected = state.notification_service.mark_all_read(user.id).await?;

    Ok(Json(ApiResponse::with_message(
        BulkResponse { affected },
        "All notifications marked read",
    )))
}

/// Delete one notification
#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "Notification ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found or not owned by the caller")
    )
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.notification_service.delete(user.id, id).await?;

    Ok(NoContent)
}

/// Delete every read notification
#[utoipa::path(
    delete,
    path = "/notifications/clear/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "How many were removed", body = BulkResponse)
    )
)]
pub async fn clear_read(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<BulkResponse>>> {
    let affected = state.notification_service.clear_read(user.id).await?;

    Ok(Json(ApiResponse::with_message(
        BulkResponse { affected },
        "Read notifications cleared",
    )))
}
