//! Profile services - student and faculty profile use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    FacultyProfile, FacultyProfileUpdate, MentorDirectoryEntry, MentorFilter, NewFacultyProfile,
    NewStudentProfile, StudentDirectoryEntry, StudentProfile, StudentProfileUpdate,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Student profile service trait for dependency injection.
#[async_trait]
pub trait StudentProfileService: Send + Sync {
    /// Create the caller's profile; at most one per user and per
    /// registration number
    async fn create(&self, user_id: Uuid, profile: NewStudentProfile)
        -> AppResult<StudentProfile>;

    /// Get the caller's own profile
    async fn get_own(&self, user_id: Uuid) -> AppResult<StudentProfile>;

    /// Partially update the caller's profile
    async fn update(
        &self,
        user_id: Uuid,
        changes: StudentProfileUpdate,
    ) -> AppResult<StudentProfile>;

    /// Delete the caller's profile
    async fn delete(&self, user_id: Uuid) -> AppResult<()>;

    /// Get any profile by its ID
    async fn get(&self, profile_id: Uuid) -> AppResult<StudentProfile>;

    /// Student directory
    async fn list(&self) -> AppResult<Vec<StudentDirectoryEntry>>;
}

/// Faculty profile service trait for dependency injection.
#[async_trait]
pub trait FacultyProfileService: Send + Sync {
    async fn create(&self, user_id: Uuid, profile: NewFacultyProfile)
        -> AppResult<FacultyProfile>;

    async fn get_own(&self, user_id: Uuid) -> AppResult<FacultyProfile>;

    async fn update(
        &self,
        user_id: Uuid,
        changes: FacultyProfileUpdate,
    ) -> AppResult<FacultyProfile>;

    async fn get(&self, profile_id: Uuid) -> AppResult<FacultyProfile>;

    /// Mentor directory with capacity/skill filters
    async fn search(&self, filter: MentorFilter) -> AppResult<Vec<MentorDirectoryEntry>>;
}

/// Concrete implementation of StudentProfileService.
pub struct StudentProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StudentProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StudentProfileService for StudentProfileManager<U> {
    async fn create(
        &self,
        user_id: Uuid,
        profile: NewStudentProfile,
    ) -> AppResult<StudentProfile> {
        let repo = self.uow.student_profiles();

        if repo.find_by_user(user_id).await?.is_some() {
            return Err(AppError::conflict("Student profile"));
        }

        if repo
            .find_by_registration_no(&profile.registration_no)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Registration number"));
        }

        repo.create(user_id, profile).await
    }

    async fn get_own(&self, user_id: Uuid) -> AppResult<StudentProfile> {
        self.uow
            .student_profiles()
            .find_by_user(user_id)
            .await?
            .ok_or_not_found()
    }

    async fn update(
        &self,
        user_id: Uuid,
        changes: StudentProfileUpdate,
    ) -> AppResult<StudentProfile> {
        self.uow
            .student_profiles()
            .update(user_id, changes)
            .await?
            .ok_or_not_found()
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        if !self.uow.student_profiles().delete_by_user(user_id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, profile_id: Uuid) -> AppResult<StudentProfile> {
        self.uow
            .student_profiles()
            .find_by_id(profile_id)
            .await?
            .ok_or_not_found()
    }

    async fn list(&self) -> AppResult<Vec<StudentDirectoryEntry>> {
        self.uow.student_profiles().list().await
    }
}

/// Concrete implementation of FacultyProfileService.
pub struct FacultyProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FacultyProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> FacultyProfileService for FacultyProfileManager<U> {
    async fn create(
        &self,
        user_id: Uuid,
        profile: NewFacultyProfile,
    ) -> AppResult<FacultyProfile> {
        let repo = self.uow.faculty_profiles();

        if repo.find_by_user(user_id).await?.is_some() {
            return Err(AppError::conflict("Faculty profile"));
        }

        repo.create(user_id, profile).await
    }

    async fn get_own(&self, user_id: Uuid) -> AppResult<FacultyProfile> {
        self.uow
            .faculty_profiles()
            .find_by_user(user_id)
            .await?
            .ok_or_not_found()
    }

    async fn update(
        &self,
        user_id: Uuid,
        changes: FacultyProfileUpdate,
    ) -> AppResult<FacultyProfile> {
        self.uow
            .faculty_profiles()
            .update(user_id, changes)
            .await?
            .ok_or_not_found()
    }

    async fn get(&self, profile_id: Uuid) -> AppResult<FacultyProfile> {
        self.uow
            .faculty_profiles()
            .find_by_id(profile_id)
            .await?
            .ok_or_not_found()
    }

    async fn search(&self, filter: MentorFilter) -> AppResult<Vec<MentorDirectoryEntry>> {
        self.uow.faculty_profiles().search(filter).await
    }
}
