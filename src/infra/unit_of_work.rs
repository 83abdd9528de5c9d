//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait instead of individual stores, so a test can
//! swap any subset of repositories. Writes that span tables (a request status
//! change plus its notification) are exposed as single repository methods
//! that run inside one database transaction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    FacultyProfileRepository, FacultyProfileStore, NotificationRepository, NotificationStore,
    RequestRepository, RequestStore, StudentProfileRepository, StudentProfileStore, UserRepository,
    UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get student profile repository
    fn student_profiles(&self) -> Arc<dyn StudentProfileRepository>;

    /// Get faculty profile repository
    fn faculty_profiles(&self) -> Arc<dyn FacultyProfileRepository>;

    /// Get project request repository
    fn requests(&self) -> Arc<dyn RequestRepository>;

    /// Get notification repository
    fn notifications(&self) -> Arc<dyn NotificationRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores.
pub struct Persistence {
    user_repo: Arc<UserStore>,
    student_profile_repo: Arc<StudentProfileStore>,
    faculty_profile_repo: Arc<FacultyProfileStore>,
    request_repo: Arc<RequestStore>,
    notification_repo: Arc<NotificationStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            student_profile_repo: Arc::new(StudentProfileStore::new(db.clone())),
            faculty_profile_repo: Arc::new(FacultyProfileStore::new(db.clone())),
            request_repo: Arc::new(RequestStore::new(db.clone())),
            notification_repo: Arc::new(NotificationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn student_profiles(&self) -> Arc<dyn StudentProfileRepository> {
        self.student_profile_repo.clone()
    }

    fn faculty_profiles(&self) -> Arc<dyn FacultyProfileRepository> {
        self.faculty_profile_repo.clone()
    }

    fn requests(&self) -> Arc<dyn RequestRepository> {
        self.request_repo.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repo.clone()
    }
}
