//! Notification service unit tests.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::{sample_notification, MockNotifications, TestUnitOfWork};
use mentor_match::errors::AppError;
use mentor_match::services::{NotificationManager, NotificationQuery, NotificationService};

fn service(repo: MockNotifications) -> NotificationManager<TestUnitOfWork> {
    NotificationManager::new(Arc::new(TestUnitOfWork::default().with_notifications(repo)))
}

#[tokio::test]
async fn test_list_returns_page_and_counters() {
    let user_id = Uuid::new_v4();

    let mut repo = MockNotifications::new();
    repo.expect_page()
        .withf(|_, offset, limit, unread_only| {
            *offset == 20 && *limit == 20 && !*unread_only
        })
        .returning(|uid, _, _, _| {
            Ok((
                vec![sample_notification(uid, false), sample_notification(uid, true)],
                42,
            ))
        });
    repo.expect_unread_count().returning(|_| Ok(7));

    let page = service(repo)
        .list(
            user_id,
            NotificationQuery {
                page: 2,
                limit: 20,
                unread_only: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.notifications.len(), 2);
    assert_eq!(page.total, 42);
    assert_eq!(page.unread, 7);
    assert_eq!(page.page, 2);
}

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    let user_id = Uuid::new_v4();
    let notification_id = Uuid::new_v4();

    let mut repo = MockNotifications::new();
    // The store reports the row as already read; the service treats that as
    // success, not an error
    repo.expect_mark_read().returning(|uid, id| {
        let mut n = sample_notification(uid, true);
        n.id = id;
        Ok(Some(n))
    });

    let service = service(repo);

    let first = service.mark_read(user_id, notification_id).await.unwrap();
    let second = service.mark_read(user_id, notification_id).await.unwrap();

    assert!(first.read);
    assert!(second.read);
}

#[tokio::test]
async fn test_mark_read_foreign_notification_is_not_found() {
    let mut repo = MockNotifications::new();
    repo.expect_mark_read().returning(|_, _| Ok(None));

    let result = service(repo).mark_read(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_mark_all_read_twice_stays_at_zero() {
    let user_id = Uuid::new_v4();

    let mut repo = MockNotifications::new();
    let mut flipped = false;
    repo.expect_mark_all_read().returning(move |_| {
        // First call flips five rows; afterwards there is nothing left to flip
        if flipped {
            Ok(0)
        } else {
            flipped = true;
            Ok(5)
        }
    });
    repo.expect_unread_count().returning(|_| Ok(0));

    let service = service(repo);

    assert_eq!(service.mark_all_read(user_id).await.unwrap(), 5);
    assert_eq!(service.mark_all_read(user_id).await.unwrap(), 0);
    assert_eq!(service.unread_count(user_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_foreign_notification_is_not_found() {
    let mut repo = MockNotifications::new();
    repo.expect_delete().returning(|_, _| Ok(false));

    let result = service(repo).delete(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_delete_own_notification_succeeds() {
    let mut repo = MockNotifications::new();
    repo.expect_delete().returning(|_, _| Ok(true));

    assert!(service(repo)
        .delete(Uuid::new_v4(), Uuid::new_v4())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_clear_read_reports_removed_count() {
    let mut repo = MockNotifications::new();
    repo.expect_clear_read().returning(|_| Ok(3));

    assert_eq!(
        service(repo).clear_read(Uuid::new_v4()).await.unwrap(),
        3
    );
}
