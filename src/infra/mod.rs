//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching (Redis): OTP codes and rate limit counters
//! - Unit of Work for centralized repository access

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, VerificationStore};
pub use db::{Database, Migrator};
pub use repositories::{
    FacultyProfileRepository, FacultyProfileStore, NotificationRepository, NotificationStore,
    RequestRepository, RequestStore, StudentProfileRepository, StudentProfileStore, UserRepository,
    UserStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};
