//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, with repository access centralized behind the
//! Unit of Work.

mod auth_service;
pub mod container;
mod notification_service;
mod profile_service;
mod request_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use notification_service::{
    NotificationManager, NotificationPage, NotificationQuery, NotificationService,
};
pub use profile_service::{
    FacultyProfileManager, FacultyProfileService, StudentProfileManager, StudentProfileService,
};
pub use request_service::{RequestManager, RequestService};
