//! Service Container - Centralized service access.
//!
//! Builds every application service over one Unit of Work so handlers reach
//! services through trait objects and tests can inject replacements.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AuthService, Authenticator, FacultyProfileManager, FacultyProfileService, NotificationManager,
    NotificationService, RequestManager, RequestService, StudentProfileManager,
    StudentProfileService,
};
use crate::config::Config;
use crate::infra::{Persistence, VerificationStore};
use crate::jobs::EmailQueue;

/// Concrete service container.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    student_profile_service: Arc<dyn StudentProfileService>,
    faculty_profile_service: Arc<dyn FacultyProfileService>,
    request_service: Arc<dyn RequestService>,
    notification_service: Arc<dyn NotificationService>,
}

impl Services {
    /// Create service container from infrastructure handles
    pub fn from_connection(
        db: DatabaseConnection,
        verification: Arc<dyn VerificationStore>,
        mailer: Arc<dyn EmailQueue>,
        config: Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(
                uow.clone(),
                verification,
                mailer.clone(),
                config,
            )),
            student_profile_service: Arc::new(StudentProfileManager::new(uow.clone())),
            faculty_profile_service: Arc::new(FacultyProfileManager::new(uow.clone())),
            request_service: Arc::new(RequestManager::new(uow.clone(), mailer)),
            notification_service: Arc::new(NotificationManager::new(uow)),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn student_profiles(&self) -> Arc<dyn StudentProfileService> {
        self.student_profile_service.clone()
    }

    pub fn faculty_profiles(&self) -> Arc<dyn FacultyProfileService> {
        self.faculty_profile_service.clone()
    }

    pub fn requests(&self) -> Arc<dyn RequestService> {
        self.request_service.clone()
    }

    pub fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }
}
