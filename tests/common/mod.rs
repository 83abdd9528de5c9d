//! Shared test fixtures: mocked repositories, a mock Unit of Work, and
//! domain object builders.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use mentor_match::domain::{
    Duration, FacultyProfile, FacultyProfileUpdate, MentorDirectoryEntry, MentorFilter,
    MentorRequestView, NewFacultyProfile, NewNotification, NewProjectRequest, NewStudentProfile,
    Notification, NotificationData, NotificationKind, ProjectRequest, RequestStatus,
    StudentDirectoryEntry, StudentProfile, StudentProfileUpdate, User, UserRole,
};
use mentor_match::errors::AppResult;
use mentor_match::infra::{
    FacultyProfileRepository, NotificationRepository, RequestRepository, StudentProfileRepository,
    UnitOfWork, UserRepository, VerificationStore,
};
use mentor_match::jobs::{EmailJob, EmailQueue};

mock! {
    pub Users {}

    #[async_trait]
    impl UserRepository for Users {
        async fn create(
            &self,
            email: String,
            password_hash: String,
            name: String,
            role: UserRole,
        ) -> AppResult<User>;
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    }
}

mock! {
    pub StudentProfiles {}

    #[async_trait]
    impl StudentProfileRepository for StudentProfiles {
        async fn create(&self, user_id: Uuid, profile: NewStudentProfile) -> AppResult<StudentProfile>;
        async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<StudentProfile>>;
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StudentProfile>>;
        async fn find_by_registration_no(
            &self,
            registration_no: &str,
        ) -> AppResult<Option<StudentProfile>>;
        async fn update(
            &self,
            user_id: Uuid,
            changes: StudentProfileUpdate,
        ) -> AppResult<Option<StudentProfile>>;
        async fn delete_by_user(&self, user_id: Uuid) -> AppResult<bool>;
        async fn list(&self) -> AppResult<Vec<StudentDirectoryEntry>>;
    }
}

mock! {
    pub FacultyProfiles {}

    #[async_trait]
    impl FacultyProfileRepository for FacultyProfiles {
        async fn create(&self, user_id: Uuid, profile: NewFacultyProfile) -> AppResult<FacultyProfile>;
        async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<FacultyProfile>>;
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FacultyProfile>>;
        async fn update(
            &self,
            user_id: Uuid,
            changes: FacultyProfileUpdate,
        ) -> AppResult<Option<FacultyProfile>>;
        async fn search(&self, filter: MentorFilter) -> AppResult<Vec<MentorDirectoryEntry>>;
    }
}

mock! {
    pub Requests {}

    #[async_trait]
    impl RequestRepository for Requests {
        async fn create(
            &self,
            student_id: Uuid,
            request: NewProjectRequest,
            notify: NewNotification,
        ) -> AppResult<ProjectRequest>;
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProjectRequest>>;
        async fn find_pending(
            &self,
            student_id: Uuid,
            mentor_id: Uuid,
        ) -> AppResult<Option<ProjectRequest>>;
        async fn list_for_student(&self, student_id: Uuid) -> AppResult<Vec<ProjectRequest>>;
        async fn list_for_mentor(&self, mentor_id: Uuid) -> AppResult<Vec<MentorRequestView>>;
        async fn apply_response(
            &self,
            request_id: Uuid,
            mentor_id: Uuid,
            status: RequestStatus,
            feedback: Option<String>,
            notify: NewNotification,
        ) -> AppResult<Option<ProjectRequest>>;
    }
}

mock! {
    pub Notifications {}

    #[async_trait]
    impl NotificationRepository for Notifications {
        async fn page(
            &self,
            user_id: Uuid,
            offset: u64,
            limit: u64,
            unread_only: bool,
        ) -> AppResult<(Vec<Notification>, u64)>;
        async fn unread_count(&self, user_id: Uuid) -> AppResult<u64>;
        async fn mark_read(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Notification>>;
        async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;
        async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
        async fn clear_read(&self, user_id: Uuid) -> AppResult<u64>;
    }
}

/// Unit of Work over mocked repositories. Mocks without expectations panic
/// on first use, so each test wires only the stores it exercises.
pub struct TestUnitOfWork {
    pub users: Arc<MockUsers>,
    pub student_profiles: Arc<MockStudentProfiles>,
    pub faculty_profiles: Arc<MockFacultyProfiles>,
    pub requests: Arc<MockRequests>,
    pub notifications: Arc<MockNotifications>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUsers::new()),
            student_profiles: Arc::new(MockStudentProfiles::new()),
            faculty_profiles: Arc::new(MockFacultyProfiles::new()),
            requests: Arc::new(MockRequests::new()),
            notifications: Arc::new(MockNotifications::new()),
        }
    }
}

impl TestUnitOfWork {
    pub fn with_users(mut self, users: MockUsers) -> Self {
        self.users = Arc::new(users);
        self
    }

    pub fn with_student_profiles(mut self, repo: MockStudentProfiles) -> Self {
        self.student_profiles = Arc::new(repo);
        self
    }

    pub fn with_faculty_profiles(mut self, repo: MockFacultyProfiles) -> Self {
        self.faculty_profiles = Arc::new(repo);
        self
    }

    pub fn with_requests(mut self, repo: MockRequests) -> Self {
        self.requests = Arc::new(repo);
        self
    }

    pub fn with_notifications(mut self, repo: MockNotifications) -> Self {
        self.notifications = Arc::new(repo);
        self
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn student_profiles(&self) -> Arc<dyn StudentProfileRepository> {
        self.student_profiles.clone()
    }

    fn faculty_profiles(&self) -> Arc<dyn FacultyProfileRepository> {
        self.faculty_profiles.clone()
    }

    fn requests(&self) -> Arc<dyn RequestRepository> {
        self.requests.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }
}

/// Email queue that swallows jobs.
pub struct NoopMailer;

#[async_trait]
impl EmailQueue for NoopMailer {
    async fn enqueue(&self, _job: EmailJob) -> AppResult<()> {
        Ok(())
    }
}

/// In-memory verification state, standing in for the Redis-backed store.
/// No TTL eviction; tests that need expiry remove entries by hand.
#[derive(Default)]
pub struct MemoryVerificationStore {
    codes: std::sync::Mutex<std::collections::HashMap<String, String>>,
    verified: std::sync::Mutex<std::collections::HashSet<String>>,
}

impl MemoryVerificationStore {
    /// Peek at the code issued for an email without consuming it
    pub fn stored_code(&self, email: &str) -> Option<String> {
        self.codes.lock().unwrap().get(email).cloned()
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn store_otp(&self, email: &str, code: &str) -> AppResult<()> {
        self.codes
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        Ok(())
    }

    async fn take_otp(&self, email: &str) -> AppResult<Option<String>> {
        Ok(self.codes.lock().unwrap().remove(email))
    }

    async fn mark_email_verified(&self, email: &str) -> AppResult<()> {
        self.verified.lock().unwrap().insert(email.to_string());
        Ok(())
    }

    async fn take_email_verified(&self, email: &str) -> AppResult<bool> {
        Ok(self.verified.lock().unwrap().remove(email))
    }
}

// =============================================================================
// Domain object builders
// =============================================================================

pub fn student_user(id: Uuid) -> User {
    User {
        id,
        email: "jane.doe@university.edu".to_string(),
        password_hash: "hashed".to_string(),
        name: "Jane Doe".to_string(),
        role: UserRole::Student,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn teacher_user(id: Uuid) -> User {
    User {
        id,
        email: "rao@university.edu".to_string(),
        password_hash: "hashed".to_string(),
        name: "Dr. Rao".to_string(),
        role: UserRole::Teacher,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_request(student_id: Uuid, mentor_id: Uuid, status: RequestStatus) -> ProjectRequest {
    ProjectRequest {
        id: Uuid::new_v4(),
        student_id,
        mentor_id,
        project_title: "Campus energy dashboard".to_string(),
        description: words(60),
        team_size: 3,
        methodology: words(35),
        tech_stack: vec!["rust".to_string(), "postgres".to_string()],
        objectives: words(25),
        expected_outcome: words(25),
        duration: Duration::ThreeToFourMonths,
        additional_notes: None,
        status,
        mentor_feedback: None,
        responded_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn new_request(mentor_id: Uuid) -> NewProjectRequest {
    NewProjectRequest {
        mentor_id,
        project_title: "Campus energy dashboard".to_string(),
        description: words(60),
        team_size: 3,
        methodology: words(35),
        tech_stack: vec!["rust".to_string()],
        objectives: words(25),
        expected_outcome: words(25),
        duration: Duration::ThreeToFourMonths,
        additional_notes: None,
    }
}

pub fn sample_notification(user_id: Uuid, read: bool) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user_id,
        kind: NotificationKind::RequestApproved,
        title: "Request approved".to_string(),
        message: "Your request was approved".to_string(),
        read,
        data: NotificationData::default(),
        created_at: Utc::now(),
    }
}

/// A text of exactly `n` words.
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}
