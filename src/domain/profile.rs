//! Student and faculty profile entities.
//!
//! Profiles carry the descriptive attributes the directory and request
//! screens are built from. At most one profile exists per user (and per
//! registration number on the student side).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Self-reported availability tier for taking on new mentees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Capacity {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "limited slots")]
    LimitedSlots,
    #[serde(rename = "full")]
    Full,
}

impl Capacity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capacity::Available => "available",
            Capacity::LimitedSlots => "limited slots",
            Capacity::Full => "full",
        }
    }
}

impl From<&str> for Capacity {
    fn from(s: &str) -> Self {
        match s {
            "available" => Capacity::Available,
            "limited slots" => Capacity::LimitedSlots,
            _ => Capacity::Full,
        }
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Student profile domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub registration_no: String,
    pub year: i16,
    pub section: String,
    pub cgpa: f64,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Faculty profile domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub designation: String,
    pub capacity: Capacity,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a student profile
#[derive(Debug, Clone)]
pub struct NewStudentProfile {
    pub registration_no: String,
    pub year: i16,
    pub section: String,
    pub cgpa: f64,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

/// Partial update of a student profile; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct StudentProfileUpdate {
    pub year: Option<i16>,
    pub section: Option<String>,
    pub cgpa: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

/// Fields for creating a faculty profile
#[derive(Debug, Clone)]
pub struct NewFacultyProfile {
    pub designation: String,
    pub capacity: Capacity,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
}

/// Partial update of a faculty profile
#[derive(Debug, Clone, Default)]
pub struct FacultyProfileUpdate {
    pub designation: Option<String>,
    pub capacity: Option<Capacity>,
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

/// Directory filters for browsing mentors
#[derive(Debug, Clone, Default)]
pub struct MentorFilter {
    pub capacity: Option<Capacity>,
    /// Case-insensitive substring match against the profile's skills
    pub skill: Option<String>,
}

/// Student profile joined with its owning user for directory listings
#[derive(Debug, Clone, Serialize)]
pub struct StudentDirectoryEntry {
    pub profile: StudentProfile,
    pub name: String,
    pub email: String,
}

/// Faculty profile joined with its owning user for directory listings
#[derive(Debug, Clone, Serialize)]
pub struct MentorDirectoryEntry {
    pub profile: FacultyProfile,
    pub name: String,
    pub email: String,
}

/// Student profile response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "2141001")]
    pub registration_no: String,
    #[schema(example = 3)]
    pub year: i16,
    #[schema(example = "B")]
    pub section: String,
    #[schema(example = 8.7)]
    pub cgpa: f64,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    #[schema(example = "https://github.com/janedoe")]
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StudentProfile> for StudentProfileResponse {
    fn from(p: StudentProfile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            registration_no: p.registration_no,
            year: p.year,
            section: p.section,
            cgpa: p.cgpa,
            skills: p.skills,
            interests: p.interests,
            github: p.github,
            linkedin: p.linkedin,
            portfolio: p.portfolio,
            created_at: p.created_at,
        }
    }
}

/// Faculty profile response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacultyProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Assistant Professor")]
    pub designation: String,
    #[schema(example = "available")]
    pub capacity: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<FacultyProfile> for FacultyProfileResponse {
    fn from(p: FacultyProfile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            designation: p.designation,
            capacity: p.capacity.to_string(),
            skills: p.skills,
            interests: p.interests,
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_round_trip() {
        assert_eq!(Capacity::from("available"), Capacity::Available);
        assert_eq!(Capacity::from("limited slots"), Capacity::LimitedSlots);
        assert_eq!(Capacity::LimitedSlots.to_string(), "limited slots");
        // Unknown tiers read back as full so no mentor is over-offered
        assert_eq!(Capacity::from("sabbatical"), Capacity::Full);
    }
}
