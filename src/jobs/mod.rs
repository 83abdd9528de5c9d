//! Background jobs.
//!
//! Outbound email (verification codes, response announcements) is delivered
//! asynchronously: request handlers enqueue, the `jobs work` worker process
//! drains. In-app notifications never travel through here; they are written
//! transactionally with the request they describe.

pub mod email_job;

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

pub use email_job::{email_job_handler, EmailJob};

/// Producer side of the email queue.
#[async_trait]
pub trait EmailQueue: Send + Sync {
    /// Hand an email to the delivery worker. Enqueueing is best-effort from
    /// the caller's perspective; delivery failures are the worker's problem.
    async fn enqueue(&self, job: EmailJob) -> AppResult<()>;
}

/// Email queue backed by the apalis Postgres storage.
pub struct EmailOutbox {
    storage: PostgresStorage<EmailJob>,
}

impl EmailOutbox {
    pub fn new(storage: PostgresStorage<EmailJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl EmailQueue for EmailOutbox {
    async fn enqueue(&self, job: EmailJob) -> AppResult<()> {
        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue email: {}", e)))?;
        Ok(())
    }
}

/// Fallback queue that logs instead of enqueueing.
///
/// Used when job storage is unavailable so the API keeps serving; the email
/// is lost, which the log line makes visible.
pub struct LogMailer;

#[async_trait]
impl EmailQueue for LogMailer {
    async fn enqueue(&self, job: EmailJob) -> AppResult<()> {
        tracing::info!(
            to = %job.to,
            subject = %job.subject,
            "Email queue not configured - logging instead of enqueueing"
        );
        Ok(())
    }
}
