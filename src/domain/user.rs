//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_STUDENT, ROLE_TEACHER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
}

impl UserRole {
    /// Check if this role can respond to project requests
    pub fn is_teacher(&self) -> bool {
        matches!(self, UserRole::Teacher)
    }

    /// Check if this role can submit project requests
    pub fn is_student(&self) -> bool {
        matches!(self, UserRole::Student)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_TEACHER => UserRole::Teacher,
            _ => UserRole::Student,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", ROLE_STUDENT),
            UserRole::Teacher => write!(f, "{}", ROLE_TEACHER),
        }
    }
}

/// User domain entity.
///
/// Accounts are created at signup and never deleted in-product; only the
/// password can change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_teacher(&self) -> bool {
        self.role.is_teacher()
    }

    pub fn is_student(&self) -> bool {
        self.role.is_student()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "jane.doe@university.edu")]
    pub email: String,
    /// User display name
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// User role
    #[schema(example = "student")]
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::Student.to_string(), "student");
        assert_eq!(UserRole::Teacher.to_string(), "teacher");
        assert_eq!(UserRole::from("teacher"), UserRole::Teacher);
        // Unknown values default to the least-privileged role
        assert_eq!(UserRole::from("dean"), UserRole::Student);
    }
}
