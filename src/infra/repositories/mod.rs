//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod notification_repository;
mod profile_repository;
mod request_repository;
mod user_repository;

pub use notification_repository::{NotificationRepository, NotificationStore};
pub use profile_repository::{
    FacultyProfileRepository, FacultyProfileStore, StudentProfileRepository, StudentProfileStore,
};
pub use request_repository::{RequestRepository, RequestStore};
pub use user_repository::{UserRepository, UserStore};
