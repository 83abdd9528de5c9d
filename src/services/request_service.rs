//! Request service - the project proposal lifecycle.
//!
//! Submission and response both produce an in-app notification for the
//! other party; the store writes it in the same transaction as the request
//! row. Email copies are enqueued after the transaction commits and are
//! best-effort.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    MentorRequestView, NewNotification, NewProjectRequest, NotificationData, NotificationKind,
    ProjectRequest, RequestStatus, ResponseStatus,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::jobs::{EmailJob, EmailQueue};

/// Request service trait for dependency injection.
#[async_trait]
pub trait RequestService: Send + Sync {
    /// Submit a new proposal to a mentor. Fails NotFound when the mentor id
    /// does not resolve to a teacher, Conflict when a pending request to the
    /// same mentor already exists.
    async fn submit(
        &self,
        student_id: Uuid,
        request: NewProjectRequest,
    ) -> AppResult<ProjectRequest>;

    /// The student's own submissions, newest first
    async fn list_for_student(&self, student_id: Uuid) -> AppResult<Vec<ProjectRequest>>;

    /// The mentor's inbox, each row annotated with the submitting student's
    /// profile
    async fn list_for_mentor(&self, mentor_id: Uuid) -> AppResult<Vec<MentorRequestView>>;

    /// A single request, visible only to its student or its mentor
    async fn get(&self, requester_id: Uuid, request_id: Uuid) -> AppResult<ProjectRequest>;

    /// Record the mentor's decision. Only the addressed mentor may respond;
    /// a later response overwrites an earlier one.
    async fn respond(
        &self,
        mentor_id: Uuid,
        request_id: Uuid,
        status: ResponseStatus,
        feedback: Option<String>,
    ) -> AppResult<ProjectRequest>;
}

/// Notification title and sentence fragment for a response status.
fn response_copy(status: RequestStatus) -> (&'static str, &'static str) {
    match status {
        RequestStatus::Approved => ("Request approved", "was approved"),
        RequestStatus::Rejected => ("Request rejected", "was rejected"),
        RequestStatus::ChangesRequested => ("Changes requested", "needs changes"),
        RequestStatus::Pending => ("Request updated", "was updated"),
    }
}

/// Concrete implementation of RequestService.
pub struct RequestManager<U: UnitOfWork> {
    uow: Arc<U>,
    mailer: Arc<dyn EmailQueue>,
}

impl<U: UnitOfWork> RequestManager<U> {
    pub fn new(uow: Arc<U>, mailer: Arc<dyn EmailQueue>) -> Self {
        Self { uow, mailer }
    }
}

#[async_trait]
impl<U: UnitOfWork> RequestService for RequestManager<U> {
    async fn submit(
        &self,
        student_id: Uuid,
        request: NewProjectRequest,
    ) -> AppResult<ProjectRequest> {
        // The addressee must be an existing teacher; anything else is
        // indistinguishable from a missing mentor
        let mentor = self
            .uow
            .users()
            .find_by_id(request.mentor_id)
            .await?
            .filter(|u| u.is_teacher())
            .ok_or_not_found()?;

        if self
            .uow
            .requests()
            .find_pending(student_id, request.mentor_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("A pending request to this mentor"));
        }

        let student_name = self
            .uow
            .users()
            .find_by_id(student_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_else(|| "A student".to_string());

        // The store stamps the new request's id into the notification data
        let notify = NewNotification {
            user_id: mentor.id,
            kind: NotificationKind::General,
            title: "New project request".to_string(),
            message: format!(
                "{} proposed \"{}\" to you",
                student_name, request.project_title
            ),
            data: NotificationData {
                request_id: None,
                mentor_name: None,
                project_title: Some(request.project_title.clone()),
                feedback: None,
            },
        };

        let created = self.uow.requests().create(student_id, request, notify).await?;

        tracing::info!(
            request_id = %created.id,
            student_id = %student_id,
            mentor_id = %created.mentor_id,
            "Project request submitted"
        );

        Ok(created)
    }

    async fn list_for_student(&self, student_id: Uuid) -> AppResult<Vec<ProjectRequest>> {
        self.uow.requests().list_for_student(student_id).await
    }

    async fn list_for_mentor(&self, mentor_id: Uuid) -> AppResult<Vec<MentorRequestView>> {
        self.uow.requests().list_for_mentor(mentor_id).await
    }

    async fn get(&self, requester_id: Uuid, request_id: Uuid) -> AppResult<ProjectRequest> {
        let request = self
            .uow
            .requests()
            .find_by_id(request_id)
            .await?
            .ok_or_not_found()?;

        if !request.involves(requester_id) {
            return Err(AppError::Forbidden);
        }

        Ok(request)
    }

    async fn respond(
        &self,
        mentor_id: Uuid,
        request_id: Uuid,
        status: ResponseStatus,
        feedback: Option<String>,
    ) -> AppResult<ProjectRequest> {
        let request = self
            .uow
            .requests()
            .find_by_id(request_id)
            .await?
            .ok_or_not_found()?;

        if request.mentor_id != mentor_id {
            return Err(AppError::Forbidden);
        }

        let mentor = self
            .uow
            .users()
            .find_by_id(mentor_id)
            .await?
            .filter(|u| u.is_teacher())
            .ok_or(AppError::Forbidden)?;

        let new_status = RequestStatus::from(status);
        let (title, status_line) = response_copy(new_status);

        let notify = NewNotification {
            user_id: request.student_id,
            kind: NotificationKind::for_status(new_status),
            title: title.to_string(),
            message: format!(
                "Your request \"{}\" {} by {}",
                request.project_title, status_line, mentor.name
            ),
            data: NotificationData {
                request_id: Some(request.id),
                mentor_name: Some(mentor.name),
                project_title: Some(request.project_title.clone()),
                feedback: feedback.clone(),
            },
        };

        // Status write and in-app notification commit or fail together
        let updated = self
            .uow
            .requests()
            .apply_response(request_id, mentor_id, new_status, feedback.clone(), notify)
            .await?
            .ok_or_not_found()?;

        // Email copy after commit; losing it leaves the inbox as the source
        // of truth
        if let Some(student) = self.uow.users().find_by_id(updated.student_id).await? {
            let job = EmailJob::request_response(
                &student.email,
                &updated.project_title,
                status_line,
                feedback.as_deref(),
            );
            if let Err(e) = self.mailer.enqueue(job).await {
                tracing::warn!(
                    request_id = %updated.id,
                    error = %e,
                    "Failed to enqueue response email"
                );
            }
        }

        tracing::info!(
            request_id = %updated.id,
            status = %updated.status,
            "Project request responded"
        );

        Ok(updated)
    }
}
