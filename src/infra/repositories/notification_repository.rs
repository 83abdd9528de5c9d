//! Notification repository.
//!
//! Every operation is scoped to the owning user; a notification belonging to
//! someone else behaves exactly like one that does not exist.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::notification::{self, Entity as NotificationEntity};
use crate::domain::Notification;
use crate::errors::{AppError, AppResult};

/// Data access for the per-user notification inbox.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// One page of the user's inbox, newest first, with the total matching
    /// count
    async fn page(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
        unread_only: bool,
    ) -> AppResult<(Vec<Notification>, u64)>;

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64>;

    /// Set the read flag; a second call on the same row is a no-op success.
    /// None when the notification is absent or owned by another user.
    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Notification>>;

    /// Returns the number of rows flipped to read
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Returns whether a row was removed
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;

    /// Delete all read notifications; returns the number removed
    async fn clear_read(&self, user_id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed notification store.
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn page(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
        unread_only: bool,
    ) -> AppResult<(Vec<Notification>, u64)> {
        let mut query = NotificationEntity::find().filter(notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(notification::Column::Read.eq(false));
        }

        let total = query.clone().count(&self.db).await.map_err(AppError::from)?;

        let models = query
            .order_by_desc(notification::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((models.into_iter().map(Notification::from).collect(), total))
    }

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64> {
        NotificationEntity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::Read.eq(false))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Notification>> {
        let Some(existing) = NotificationEntity::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        // Already read: nothing to write
        if existing.read {
            return Ok(Some(Notification::from(existing)));
        }

        let mut active: notification::ActiveModel = existing.into();
        active.read = Set(true);

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Some(Notification::from(model)))
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::Read.eq(false))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = NotificationEntity::delete_many()
            .filter(notification::Column::Id.eq(id))
            .filter(notification::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn clear_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = NotificationEntity::delete_many()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::Read.eq(true))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
