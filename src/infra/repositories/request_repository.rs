//! Project request repository.
//!
//! The two write paths that must also produce an inbox notification (create
//! and respond) run the request write and the notification insert in a single
//! database transaction, so a crash can never record a status change without
//! its notification.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::entities::{
    notification,
    project_request::{self, Entity as RequestEntity},
    student_profile::{self, Entity as StudentProfileEntity},
    user::{self, Entity as UserEntity},
};
use crate::domain::{
    MentorRequestView, NewNotification, NewProjectRequest, ProjectRequest, RequestStatus,
    StudentSummary,
};
use crate::errors::{AppError, AppResult};

/// Data access for project requests.
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Insert a new pending request and the mentor's inbox notification
    /// atomically
    async fn create(
        &self,
        student_id: Uuid,
        request: NewProjectRequest,
        notify: NewNotification,
    ) -> AppResult<ProjectRequest>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProjectRequest>>;

    /// The student's pending request to the given mentor, if any
    async fn find_pending(
        &self,
        student_id: Uuid,
        mentor_id: Uuid,
    ) -> AppResult<Option<ProjectRequest>>;

    /// The student's submissions, newest first
    async fn list_for_student(&self, student_id: Uuid) -> AppResult<Vec<ProjectRequest>>;

    /// The mentor's inbox, newest first, each row annotated with the
    /// submitting student's profile
    async fn list_for_mentor(&self, mentor_id: Uuid) -> AppResult<Vec<MentorRequestView>>;

    /// Overwrite status/feedback and stamp responded_at, inserting the
    /// student's notification in the same transaction. The update is filtered
    /// on (id, mentor_id); None means no such row belongs to this mentor.
    async fn apply_response(
        &self,
        request_id: Uuid,
        mentor_id: Uuid,
        status: RequestStatus,
        feedback: Option<String>,
        notify: NewNotification,
    ) -> AppResult<Option<ProjectRequest>>;
}

/// Build the insertable row for an inbox notification.
fn notification_row(notify: NewNotification) -> notification::ActiveModel {
    notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(notify.user_id),
        kind: Set(notify.kind.to_string()),
        title: Set(notify.title),
        message: Set(notify.message),
        read: Set(false),
        data: Set(serde_json::to_value(&notify.data).unwrap_or_default()),
        created_at: Set(Utc::now()),
    }
}

/// SeaORM-backed request store.
pub struct RequestStore {
    db: DatabaseConnection,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RequestRepository for RequestStore {
    async fn create(
        &self,
        student_id: Uuid,
        request: NewProjectRequest,
        mut notify: NewNotification,
    ) -> AppResult<ProjectRequest> {
        let now = Utc::now();
        let active_model = project_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            mentor_id: Set(request.mentor_id),
            project_title: Set(request.project_title),
            description: Set(request.description),
            team_size: Set(request.team_size),
            methodology: Set(request.methodology),
            tech_stack: Set(serde_json::json!(request.tech_stack)),
            objectives: Set(request.objectives),
            expected_outcome: Set(request.expected_outcome),
            duration: Set(request.duration.to_string()),
            additional_notes: Set(request.additional_notes),
            status: Set(RequestStatus::Pending.to_string()),
            mentor_feedback: Set(None),
            responded_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let txn = self.db.begin().await.map_err(AppError::from)?;

        let model = active_model.insert(&txn).await.map_err(AppError::from)?;

        // The caller cannot know the new request's id; stamp it here
        notify.data.request_id.get_or_insert(model.id);
        notification_row(notify)
            .insert(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;

        Ok(ProjectRequest::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProjectRequest>> {
        let result = RequestEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ProjectRequest::from))
    }

    async fn find_pending(
        &self,
        student_id: Uuid,
        mentor_id: Uuid,
    ) -> AppResult<Option<ProjectRequest>> {
        let result = RequestEntity::find()
            .filter(project_request::Column::StudentId.eq(student_id))
            .filter(project_request::Column::MentorId.eq(mentor_id))
            .filter(project_request::Column::Status.eq(RequestStatus::Pending.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ProjectRequest::from))
    }

    async fn list_for_student(&self, student_id: Uuid) -> AppResult<Vec<ProjectRequest>> {
        let models = RequestEntity::find()
            .filter(project_request::Column::StudentId.eq(student_id))
            .order_by_desc(project_request::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ProjectRequest::from).collect())
    }

    async fn list_for_mentor(&self, mentor_id: Uuid) -> AppResult<Vec<MentorRequestView>> {
        let models = RequestEntity::find()
            .filter(project_request::Column::MentorId.eq(mentor_id))
            .order_by_desc(project_request::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let student_ids: Vec<Uuid> = models.iter().map(|m| m.student_id).collect();

        // Requests store only the student's id; the profile attributes the
        // mentor filters on are resolved by lookup
        let profiles: HashMap<Uuid, student_profile::Model> = StudentProfileEntity::find()
            .filter(student_profile::Column::UserId.is_in(student_ids.clone()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|p| (p.user_id, p))
            .collect();

        let names: HashMap<Uuid, String> = UserEntity::find()
            .filter(user::Column::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let student = profiles.get(&m.student_id).map(|p| StudentSummary {
                    name: names.get(&m.student_id).cloned().unwrap_or_default(),
                    registration_no: p.registration_no.clone(),
                    year: p.year,
                    section: p.section.clone(),
                    cgpa: p.cgpa,
                    skills: super::entities::string_list(p.skills.clone()),
                    interests: super::entities::string_list(p.interests.clone()),
                    github: p.github.clone(),
                });

                MentorRequestView {
                    request: ProjectRequest::from(m),
                    student,
                }
            })
            .collect())
    }

    async fn apply_response(
        &self,
        request_id: Uuid,
        mentor_id: Uuid,
        status: RequestStatus,
        feedback: Option<String>,
        notify: NewNotification,
    ) -> AppResult<Option<ProjectRequest>> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        // Filter on (id, mentor_id) so only the addressed mentor's row can
        // ever be touched, whatever the caller believed it loaded
        let Some(existing) = RequestEntity::find_by_id(request_id)
            .filter(project_request::Column::MentorId.eq(mentor_id))
            .one(&txn)
            .await
            .map_err(AppError::from)?
        else {
            txn.rollback().await.map_err(AppError::from)?;
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: project_request::ActiveModel = existing.into();
        active.status = Set(status.to_string());
        active.mentor_feedback = Set(feedback);
        active.responded_at = Set(Some(now));
        active.updated_at = Set(now);

        let model = active.update(&txn).await.map_err(AppError::from)?;
        notification_row(notify)
            .insert(&txn)
            .await
            .map_err(AppError::from)?;

        txn.commit().await.map_err(AppError::from)?;

        Ok(Some(ProjectRequest::from(model)))
    }
}
