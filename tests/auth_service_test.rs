//! Auth service unit tests.
//!
//! The verification store is an in-memory stand-in for Redis; users come
//! from a mocked repository. Covers the OTP flow, the university-domain
//! restriction, duplicate-signup rejection, and token round trips.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::{student_user, MemoryVerificationStore, MockUsers, NoopMailer, TestUnitOfWork};
use mentor_match::config::Config;
use mentor_match::domain::{Password, UserRole};
use mentor_match::errors::AppError;
use mentor_match::infra::VerificationStore;
use mentor_match::services::{AuthService, Authenticator};

fn authenticator(
    users: MockUsers,
    store: Arc<MemoryVerificationStore>,
) -> Authenticator<TestUnitOfWork> {
    Authenticator::new(
        Arc::new(TestUnitOfWork::default().with_users(users)),
        store,
        Arc::new(NoopMailer),
        Config::from_env(),
    )
}

#[tokio::test]
async fn test_send_otp_rejects_foreign_domain() {
    let service = authenticator(MockUsers::new(), Arc::new(MemoryVerificationStore::default()));

    let result = service.send_otp("jane@gmail.com".to_string()).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_send_otp_rejects_existing_account() {
    let mut users = MockUsers::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(student_user(Uuid::new_v4()))));

    let service = authenticator(users, Arc::new(MemoryVerificationStore::default()));
    let result = service
        .send_otp("jane.doe@university.edu".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_otp_flow_verifies_email_once() {
    let email = "jane.doe@university.edu";

    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let store = Arc::new(MemoryVerificationStore::default());
    let service = authenticator(users, store.clone());

    service.send_otp(email.to_string()).await.unwrap();
    let code = store.stored_code(email).expect("code was issued");

    service
        .verify_otp(email.to_string(), code.clone())
        .await
        .unwrap();

    // The code was consumed by verification; replaying it fails
    let replay = service.verify_otp(email.to_string(), code).await;
    assert!(matches!(replay.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_wrong_code_burns_the_otp() {
    let email = "jane.doe@university.edu";

    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let store = Arc::new(MemoryVerificationStore::default());
    let service = authenticator(users, store.clone());

    service.send_otp(email.to_string()).await.unwrap();
    let code = store.stored_code(email).unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    // Each issued code is good for exactly one attempt
    let result = service.verify_otp(email.to_string(), wrong.to_string()).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    assert!(store.stored_code(email).is_none());
}

#[tokio::test]
async fn test_signup_requires_verified_email() {
    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let service = authenticator(users, Arc::new(MemoryVerificationStore::default()));
    let result = service
        .signup(
            "Jane Doe".to_string(),
            "jane.doe@university.edu".to_string(),
            "SecurePass123!".to_string(),
            UserRole::Student,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_signup_creates_exactly_one_account() {
    let email = "jane.doe@university.edu";

    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users
        .expect_create()
        .withf(|email, _, _, role| {
            email.as_str() == "jane.doe@university.edu" && *role == UserRole::Student
        })
        .returning(|email, hash, name, role| {
            let mut u = student_user(Uuid::new_v4());
            u.email = email;
            u.password_hash = hash;
            u.name = name;
            u.role = role;
            Ok(u)
        });

    let store = Arc::new(MemoryVerificationStore::default());
    let service = authenticator(users, store.clone());

    service.send_otp(email.to_string()).await.unwrap();
    let code = store.stored_code(email).unwrap();
    service.verify_otp(email.to_string(), code).await.unwrap();

    let user = service
        .signup(
            "Jane Doe".to_string(),
            email.to_string(),
            "SecurePass123!".to_string(),
            UserRole::Student,
        )
        .await
        .unwrap();
    assert_eq!(user.email, email);

    // The verified marker was consumed; repeating signup without
    // re-verifying fails even before the duplicate-email check can fire
    let again = service
        .signup(
            "Jane Doe".to_string(),
            email.to_string(),
            "SecurePass123!".to_string(),
            UserRole::Student,
        )
        .await;
    assert!(again.is_err());
}

#[tokio::test]
async fn test_duplicate_email_signup_is_conflict() {
    let mut users = MockUsers::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(student_user(Uuid::new_v4()))));

    let store = Arc::new(MemoryVerificationStore::default());
    store
        .mark_email_verified("jane.doe@university.edu")
        .await
        .unwrap();

    let service = authenticator(users, store);
    let result = service
        .signup(
            "Jane Doe".to_string(),
            "jane.doe@university.edu".to_string(),
            "SecurePass123!".to_string(),
            UserRole::Student,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_signin_round_trips_a_token() {
    let user_id = Uuid::new_v4();
    let hash = Password::new("SecurePass123!").unwrap().into_string();

    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(move |_| {
        let mut u = student_user(user_id);
        u.password_hash = hash.clone();
        Ok(Some(u))
    });

    let service = authenticator(users, Arc::new(MemoryVerificationStore::default()));
    let token = service
        .signin(
            "jane.doe@university.edu".to_string(),
            "SecurePass123!".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, "student");
}

#[tokio::test]
async fn test_signin_wrong_password_is_invalid_credentials() {
    let hash = Password::new("SecurePass123!").unwrap().into_string();

    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(move |_| {
        let mut u = student_user(Uuid::new_v4());
        u.password_hash = hash.clone();
        Ok(Some(u))
    });

    let service = authenticator(users, Arc::new(MemoryVerificationStore::default()));
    let result = service
        .signin(
            "jane.doe@university.edu".to_string(),
            "WrongPass123!".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_signin_unknown_email_is_invalid_credentials() {
    let mut users = MockUsers::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let service = authenticator(users, Arc::new(MemoryVerificationStore::default()));
    let result = service
        .signin(
            "ghost@university.edu".to_string(),
            "SecurePass123!".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_verify_garbage_token_fails() {
    let service = authenticator(MockUsers::new(), Arc::new(MemoryVerificationStore::default()));

    assert!(service.verify_token("not-a-jwt").is_err());
}
