//! Email background job.
//!
//! Provides email sending functionality via background jobs.
//! In development mode, emails are logged. In production, configure
//! SMTP settings via environment variables.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AppError;

/// Email job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text)
    pub body: String,
}

impl EmailJob {
    /// Create a new email job
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Email carrying a signup verification code
    pub fn verification_code(to: impl Into<String>, code: &str, ttl_minutes: u64) -> Self {
        Self::new(
            to,
            "Your verification code",
            format!(
                "Your Mentor Match verification code is {}. It expires in {} minutes.",
                code, ttl_minutes
            ),
        )
    }

    /// Email announcing a mentor's response to a project request
    pub fn request_response(
        to: impl Into<String>,
        project_title: &str,
        status_line: &str,
        feedback: Option<&str>,
    ) -> Self {
        let mut body = format!("Your project request \"{}\" {}.", project_title, status_line);
        if let Some(feedback) = feedback {
            body.push_str("\n\nMentor feedback:\n");
            body.push_str(feedback);
        }
        Self::new(to, format!("Project request update: {}", project_title), body)
    }
}

/// Email configuration from environment.
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@university.edu".to_string()),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    let config = EmailConfig::from_env();

    tracing::info!(
        to = %job.to,
        from = %config.smtp_from,
        subject = %job.subject,
        "Processing email job"
    );

    if !config.is_configured() {
        // Development mode: log the email instead of sending
        tracing::warn!("SMTP not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            config.smtp_from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    // TODO: wire up lettre for real SMTP delivery once the relay account
    // is provisioned
    tracing::warn!(
        "SMTP is configured but no transport is installed; email to {} was dropped",
        job.to
    );

    Ok(())
}
