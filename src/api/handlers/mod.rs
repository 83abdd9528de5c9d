//! HTTP request handlers.

pub mod auth_handler;
pub mod notification_handler;
pub mod request_handler;
pub mod student_handler;
pub mod teacher_handler;

pub use auth_handler::auth_routes;
pub use notification_handler::notification_routes;
pub use request_handler::request_routes;
pub use student_handler::student_routes;
pub use teacher_handler::teacher_routes;
