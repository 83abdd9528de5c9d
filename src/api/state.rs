//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::jobs::EmailQueue;
use crate::services::{
    AuthService, FacultyProfileService, NotificationService, RequestService, Services,
    StudentProfileService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Student profile service
    pub student_profile_service: Arc<dyn StudentProfileService>,
    /// Faculty profile service
    pub faculty_profile_service: Arc<dyn FacultyProfileService>,
    /// Project request service
    pub request_service: Arc<dyn RequestService>,
    /// Notification service
    pub notification_service: Arc<dyn NotificationService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from infrastructure handles and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        mailer: Arc<dyn EmailQueue>,
        config: crate::config::Config,
    ) -> Self {
        let container = Services::from_connection(
            database.get_connection(),
            cache.clone(),
            mailer,
            config,
        );

        Self {
            auth_service: container.auth(),
            student_profile_service: container.student_profiles(),
            faculty_profile_service: container.faculty_profiles(),
            request_service: container.requests(),
            notification_service: container.notifications(),
            cache,
            database,
        }
    }

}
