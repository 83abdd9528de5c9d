//! Notification service - per-user inbox use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::Notification;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Inbox paging parameters.
#[derive(Debug, Clone, Copy)]
pub struct NotificationQuery {
    pub page: u64,
    pub limit: u64,
    pub unread_only: bool,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
            unread_only: false,
        }
    }
}

impl NotificationQuery {
    /// Offset for the store query
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.limit()
    }

    /// Limit capped at the maximum page size
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of a user's inbox with its counters.
#[derive(Debug)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub page: u64,
    pub limit: u64,
    /// Notifications matching the query, across all pages
    pub total: u64,
    /// Unread notifications for the user, regardless of the query
    pub unread: u64,
}

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// One page of the user's inbox, newest first
    async fn list(&self, user_id: Uuid, query: NotificationQuery) -> AppResult<NotificationPage>;

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64>;

    /// Idempotent: marking an already-read notification is a no-op success
    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Notification>;

    /// Returns how many notifications were flipped; zero is a success
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Delete all read notifications; returns how many were removed
    async fn clear_read(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of NotificationService.
pub struct NotificationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NotificationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for NotificationManager<U> {
    async fn list(&self, user_id: Uuid, query: NotificationQuery) -> AppResult<NotificationPage> {
        let repo = self.uow.notifications();

        let (notifications, total) = repo
            .page(user_id, query.offset(), query.limit(), query.unread_only)
            .await?;
        let unread = repo.unread_count(user_id).await?;

        Ok(NotificationPage {
            notifications,
            page: query.page.max(DEFAULT_PAGE_NUMBER),
            limit: query.limit(),
            total,
            unread,
        })
    }

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64> {
        self.uow.notifications().unread_count(user_id).await
    }

    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Notification> {
        self.uow
            .notifications()
            .mark_read(user_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        self.uow.notifications().mark_all_read(user_id).await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        if !self.uow.notifications().delete(user_id, id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn clear_read(&self, user_id: Uuid) -> AppResult<u64> {
        self.uow.notifications().clear_read(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_offset_and_cap() {
        let q = NotificationQuery {
            page: 3,
            limit: 10,
            unread_only: false,
        };
        assert_eq!(q.offset(), 20);

        let oversized = NotificationQuery {
            page: 1,
            limit: 10_000,
            unread_only: false,
        };
        assert_eq!(oversized.limit(), MAX_PAGE_SIZE);

        let zero = NotificationQuery {
            page: 0,
            limit: 0,
            unread_only: false,
        };
        // Page 0 behaves like page 1 and a zero limit still returns rows
        assert_eq!(zero.offset(), 0);
        assert_eq!(zero.limit(), 1);
    }
}
