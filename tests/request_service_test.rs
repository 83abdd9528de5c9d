//! Request service unit tests.
//!
//! The repository layer is mocked; these tests pin down the service's
//! authorization rules, the pending-duplicate invariant, and the
//! notification each write produces.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::{
    new_request, sample_request, student_user, teacher_user, MockRequests, MockUsers, NoopMailer,
    TestUnitOfWork,
};
use mentor_match::domain::{NotificationKind, RequestStatus, ResponseStatus};
use mentor_match::errors::AppError;
use mentor_match::services::{RequestManager, RequestService};

fn service(uow: TestUnitOfWork) -> RequestManager<TestUnitOfWork> {
    RequestManager::new(Arc::new(uow), Arc::new(NoopMailer))
}

#[tokio::test]
async fn test_submit_unknown_mentor_is_not_found() {
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();

    let mut users = MockUsers::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = service(TestUnitOfWork::default().with_users(users));
    let result = service.submit(student_id, new_request(mentor_id)).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_submit_to_student_is_not_found() {
    // A mentor id resolving to a non-teacher behaves like a missing mentor
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();

    let mut users = MockUsers::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(student_user(id))));

    let service = service(TestUnitOfWork::default().with_users(users));
    let result = service.submit(student_id, new_request(mentor_id)).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_submit_with_pending_duplicate_is_conflict() {
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();

    let mut users = MockUsers::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(teacher_user(id))));

    let mut requests = MockRequests::new();
    requests.expect_find_pending().returning(|student, mentor| {
        Ok(Some(sample_request(student, mentor, RequestStatus::Pending)))
    });

    let service = service(
        TestUnitOfWork::default()
            .with_users(users)
            .with_requests(requests),
    );
    let result = service.submit(student_id, new_request(mentor_id)).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_submit_success_notifies_mentor() {
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();

    let mut users = MockUsers::new();
    users.expect_find_by_id().returning(move |id| {
        if id == mentor_id {
            Ok(Some(teacher_user(id)))
        } else {
            Ok(Some(student_user(id)))
        }
    });

    let mut requests = MockRequests::new();
    requests.expect_find_pending().returning(|_, _| Ok(None));
    requests
        .expect_create()
        .withf(move |_, request, notify| {
            // The mentor gets a general notification naming the proposal
            notify.user_id == request.mentor_id
                && notify.kind == NotificationKind::General
                && notify.message.contains("Campus energy dashboard")
                && notify.message.contains("Jane Doe")
        })
        .returning(|student, request, _| {
            Ok(sample_request(student, request.mentor_id, RequestStatus::Pending))
        });

    let service = service(
        TestUnitOfWork::default()
            .with_users(users)
            .with_requests(requests),
    );
    let created = service
        .submit(student_id, new_request(mentor_id))
        .await
        .unwrap();

    assert_eq!(created.status, RequestStatus::Pending);
    assert_eq!(created.mentor_id, mentor_id);
    assert!(created.responded_at.is_none());
}

#[tokio::test]
async fn test_respond_by_wrong_mentor_is_forbidden() {
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();
    let other_teacher = Uuid::new_v4();

    let mut requests = MockRequests::new();
    requests.expect_find_by_id().returning(move |id| {
        let mut r = sample_request(student_id, mentor_id, RequestStatus::Pending);
        r.id = id;
        Ok(Some(r))
    });

    let service = service(TestUnitOfWork::default().with_requests(requests));
    let result = service
        .respond(other_teacher, Uuid::new_v4(), ResponseStatus::Approved, None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_respond_by_own_student_is_forbidden() {
    // The request's own student may read it but never respond to it
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();

    let mut requests = MockRequests::new();
    requests.expect_find_by_id().returning(move |id| {
        let mut r = sample_request(student_id, mentor_id, RequestStatus::Pending);
        r.id = id;
        Ok(Some(r))
    });

    let service = service(TestUnitOfWork::default().with_requests(requests));
    let result = service
        .respond(student_id, Uuid::new_v4(), ResponseStatus::Approved, None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_respond_missing_request_is_not_found() {
    let mut requests = MockRequests::new();
    requests.expect_find_by_id().returning(|_| Ok(None));

    let service = service(TestUnitOfWork::default().with_requests(requests));
    let result = service
        .respond(Uuid::new_v4(), Uuid::new_v4(), ResponseStatus::Rejected, None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_respond_approved_updates_and_notifies_student() {
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();
    let request_id = Uuid::new_v4();

    let mut users = MockUsers::new();
    users.expect_find_by_id().returning(move |id| {
        if id == mentor_id {
            Ok(Some(teacher_user(id)))
        } else {
            Ok(Some(student_user(id)))
        }
    });

    let mut requests = MockRequests::new();
    requests.expect_find_by_id().returning(move |id| {
        let mut r = sample_request(student_id, mentor_id, RequestStatus::Pending);
        r.id = id;
        Ok(Some(r))
    });
    requests
        .expect_apply_response()
        .withf(move |req_id, m_id, status, feedback, notify| {
            *req_id == request_id
                && *m_id == mentor_id
                && *status == RequestStatus::Approved
                && feedback.as_deref() == Some("Great proposal")
                && notify.user_id == student_id
                && notify.kind == NotificationKind::RequestApproved
                && notify.data.feedback.as_deref() == Some("Great proposal")
                && notify.data.mentor_name.as_deref() == Some("Dr. Rao")
        })
        .returning(move |req_id, m_id, status, feedback, _| {
            let mut r = sample_request(student_id, m_id, status);
            r.id = req_id;
            r.mentor_feedback = feedback;
            r.responded_at = Some(chrono::Utc::now());
            Ok(Some(r))
        });

    let service = service(
        TestUnitOfWork::default()
            .with_users(users)
            .with_requests(requests),
    );
    let updated = service
        .respond(
            mentor_id,
            request_id,
            ResponseStatus::Approved,
            Some("Great proposal".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, RequestStatus::Approved);
    assert_eq!(updated.mentor_feedback.as_deref(), Some("Great proposal"));
    assert!(updated.responded_at.is_some());
}

#[tokio::test]
async fn test_respond_changes_requested_uses_matching_kind() {
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();

    let mut users = MockUsers::new();
    users.expect_find_by_id().returning(move |id| {
        if id == mentor_id {
            Ok(Some(teacher_user(id)))
        } else {
            Ok(Some(student_user(id)))
        }
    });

    let mut requests = MockRequests::new();
    requests.expect_find_by_id().returning(move |id| {
        let mut r = sample_request(student_id, mentor_id, RequestStatus::Approved);
        r.id = id;
        Ok(Some(r))
    });
    requests
        .expect_apply_response()
        .withf(|_, _, status, _, notify| {
            *status == RequestStatus::ChangesRequested
                && notify.kind == NotificationKind::RequestChanges
        })
        .returning(move |req_id, m_id, status, feedback, _| {
            let mut r = sample_request(student_id, m_id, status);
            r.id = req_id;
            r.mentor_feedback = feedback;
            r.responded_at = Some(chrono::Utc::now());
            Ok(Some(r))
        });

    let service = service(
        TestUnitOfWork::default()
            .with_users(users)
            .with_requests(requests),
    );

    // A request that already left pending can still be re-responded
    let updated = service
        .respond(
            mentor_id,
            Uuid::new_v4(),
            ResponseStatus::ChangesRequested,
            Some("Narrow the scope".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, RequestStatus::ChangesRequested);
}

#[tokio::test]
async fn test_get_visible_to_both_parties_only() {
    let student_id = Uuid::new_v4();
    let mentor_id = Uuid::new_v4();
    let outsider = Uuid::new_v4();

    let mut requests = MockRequests::new();
    requests.expect_find_by_id().returning(move |id| {
        let mut r = sample_request(student_id, mentor_id, RequestStatus::Approved);
        r.id = id;
        Ok(Some(r))
    });

    let service = service(TestUnitOfWork::default().with_requests(requests));

    assert!(service.get(student_id, Uuid::new_v4()).await.is_ok());
    assert!(service.get(mentor_id, Uuid::new_v4()).await.is_ok());
    assert!(matches!(
        service.get(outsider, Uuid::new_v4()).await.unwrap_err(),
        AppError::Forbidden
    ));
}

#[tokio::test]
async fn test_list_for_student_passes_through() {
    let student_id = Uuid::new_v4();

    let mut requests = MockRequests::new();
    requests.expect_list_for_student().returning(move |sid| {
        Ok(vec![
            sample_request(sid, Uuid::new_v4(), RequestStatus::Pending),
            sample_request(sid, Uuid::new_v4(), RequestStatus::Rejected),
        ])
    });

    let service = service(TestUnitOfWork::default().with_requests(requests));
    let listed = service.list_for_student(student_id).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|r| r.student_id == student_id));
}
