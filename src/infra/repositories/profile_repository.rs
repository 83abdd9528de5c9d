//! Student and faculty profile repositories.
//!
//! Directory reads join profiles with their owning users by a second lookup
//! rather than a SQL join: profile-to-user references are weak, and a profile
//! whose user row is missing is skipped instead of failing the listing.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{
    faculty_profile::{self, Entity as FacultyProfileEntity},
    student_profile::{self, Entity as StudentProfileEntity},
    user::{self, Entity as UserEntity},
};
use crate::domain::{
    FacultyProfile, FacultyProfileUpdate, MentorDirectoryEntry, MentorFilter, NewFacultyProfile,
    NewStudentProfile, StudentDirectoryEntry, StudentProfile, StudentProfileUpdate,
};
use crate::errors::{AppError, AppResult};

/// Data access for student profiles.
#[async_trait]
pub trait StudentProfileRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, profile: NewStudentProfile) -> AppResult<StudentProfile>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<StudentProfile>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StudentProfile>>;

    async fn find_by_registration_no(&self, registration_no: &str)
        -> AppResult<Option<StudentProfile>>;

    /// Apply a partial update; returns None when the user has no profile
    async fn update(
        &self,
        user_id: Uuid,
        changes: StudentProfileUpdate,
    ) -> AppResult<Option<StudentProfile>>;

    /// Delete the user's profile; returns whether a row was removed
    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<bool>;

    /// All student profiles joined with user names, newest first
    async fn list(&self) -> AppResult<Vec<StudentDirectoryEntry>>;
}

/// Data access for faculty profiles.
#[async_trait]
pub trait FacultyProfileRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, profile: NewFacultyProfile) -> AppResult<FacultyProfile>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<FacultyProfile>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FacultyProfile>>;

    async fn update(
        &self,
        user_id: Uuid,
        changes: FacultyProfileUpdate,
    ) -> AppResult<Option<FacultyProfile>>;

    /// Mentor directory filtered by capacity and/or skill, newest first
    async fn search(&self, filter: MentorFilter) -> AppResult<Vec<MentorDirectoryEntry>>;
}

/// Fetch (name, email) for the given user ids in one query.
async fn user_lookup(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, (String, String)>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = UserEntity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(AppError::from)?;

    Ok(users
        .into_iter()
        .map(|u| (u.id, (u.name, u.email)))
        .collect())
}

/// SeaORM-backed student profile store.
pub struct StudentProfileStore {
    db: DatabaseConnection,
}

impl StudentProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentProfileRepository for StudentProfileStore {
    async fn create(&self, user_id: Uuid, profile: NewStudentProfile) -> AppResult<StudentProfile> {
        let now = Utc::now();
        let active_model = student_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            registration_no: Set(profile.registration_no),
            year: Set(profile.year),
            section: Set(profile.section),
            cgpa: Set(profile.cgpa),
            skills: Set(serde_json::json!(profile.skills)),
            interests: Set(serde_json::json!(profile.interests)),
            github: Set(profile.github),
            linkedin: Set(profile.linkedin),
            portfolio: Set(profile.portfolio),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(StudentProfile::from(model))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<StudentProfile>> {
        let result = StudentProfileEntity::find()
            .filter(student_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StudentProfile::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StudentProfile>> {
        let result = StudentProfileEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StudentProfile::from))
    }

    async fn find_by_registration_no(
        &self,
        registration_no: &str,
    ) -> AppResult<Option<StudentProfile>> {
        let result = StudentProfileEntity::find()
            .filter(student_profile::Column::RegistrationNo.eq(registration_no))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StudentProfile::from))
    }

    async fn update(
        &self,
        user_id: Uuid,
        changes: StudentProfileUpdate,
    ) -> AppResult<Option<StudentProfile>> {
        let Some(existing) = StudentProfileEntity::find()
            .filter(student_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let mut active: student_profile::ActiveModel = existing.into();

        if let Some(year) = changes.year {
            active.year = Set(year);
        }
        if let Some(section) = changes.section {
            active.section = Set(section);
        }
        if let Some(cgpa) = changes.cgpa {
            active.cgpa = Set(cgpa);
        }
        if let Some(skills) = changes.skills {
            active.skills = Set(serde_json::json!(skills));
        }
        if let Some(interests) = changes.interests {
            active.interests = Set(serde_json::json!(interests));
        }
        if let Some(github) = changes.github {
            active.github = Set(Some(github));
        }
        if let Some(linkedin) = changes.linkedin {
            active.linkedin = Set(Some(linkedin));
        }
        if let Some(portfolio) = changes.portfolio {
            active.portfolio = Set(Some(portfolio));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Some(StudentProfile::from(model)))
    }

    async fn delete_by_user(&self, user_id: Uuid) -> AppResult<bool> {
        let result = StudentProfileEntity::delete_many()
            .filter(student_profile::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self) -> AppResult<Vec<StudentDirectoryEntry>> {
        let profiles = StudentProfileEntity::find()
            .order_by_desc(student_profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let users = user_lookup(&self.db, profiles.iter().map(|p| p.user_id).collect()).await?;

        Ok(profiles
            .into_iter()
            .filter_map(|p| {
                let (name, email) = users.get(&p.user_id).cloned()?;
                Some(StudentDirectoryEntry {
                    profile: StudentProfile::from(p),
                    name,
                    email,
                })
            })
            .collect())
    }
}

/// SeaORM-backed faculty profile store.
pub struct FacultyProfileStore {
    db: DatabaseConnection,
}

impl FacultyProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FacultyProfileRepository for FacultyProfileStore {
    async fn create(&self, user_id: Uuid, profile: NewFacultyProfile) -> AppResult<FacultyProfile> {
        let now = Utc::now();
        let active_model = faculty_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            designation: Set(profile.designation),
            capacity: Set(profile.capacity.to_string()),
            skills: Set(serde_json::json!(profile.skills)),
            interests: Set(serde_json::json!(profile.interests)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(FacultyProfile::from(model))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<FacultyProfile>> {
        let result = FacultyProfileEntity::find()
            .filter(faculty_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(FacultyProfile::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FacultyProfile>> {
        let result = FacultyProfileEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(FacultyProfile::from))
    }

    async fn update(
        &self,
        user_id: Uuid,
        changes: FacultyProfileUpdate,
    ) -> AppResult<Option<FacultyProfile>> {
        let Some(existing) = FacultyProfileEntity::find()
            .filter(faculty_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let mut active: faculty_profile::ActiveModel = existing.into();

        if let Some(designation) = changes.designation {
            active.designation = Set(designation);
        }
        if let Some(capacity) = changes.capacity {
            active.capacity = Set(capacity.to_string());
        }
        if let Some(skills) = changes.skills {
            active.skills = Set(serde_json::json!(skills));
        }
        if let Some(interests) = changes.interests {
            active.interests = Set(serde_json::json!(interests));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Some(FacultyProfile::from(model)))
    }

    async fn search(&self, filter: MentorFilter) -> AppResult<Vec<MentorDirectoryEntry>> {
        let mut query = FacultyProfileEntity::find();

        if let Some(capacity) = filter.capacity {
            query = query.filter(faculty_profile::Column::Capacity.eq(capacity.to_string()));
        }

        let profiles = query
            .order_by_desc(faculty_profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let users = user_lookup(&self.db, profiles.iter().map(|p| p.user_id).collect()).await?;

        let skill = filter.skill.map(|s| s.to_lowercase());

        Ok(profiles
            .into_iter()
            .filter_map(|p| {
                let (name, email) = users.get(&p.user_id).cloned()?;
                let profile = FacultyProfile::from(p);

                // Skill lists are JSON blobs, so substring matching happens here
                if let Some(needle) = &skill {
                    let matched = profile
                        .skills
                        .iter()
                        .any(|s| s.to_lowercase().contains(needle));
                    if !matched {
                        return None;
                    }
                }

                Some(MentorDirectoryEntry {
                    profile,
                    name,
                    email,
                })
            })
            .collect())
    }
}
