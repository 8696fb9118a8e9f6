//! Email delivery for attendee notifications
//!
//! Uses lettre for SMTP transport. Handlers talk to the `Mailer` trait so
//! tests can substitute a recording implementation.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::SmtpTransport;
use lettre::{Message, Transport};
use thiserror::Error;

use crate::infrastructure::database::entities::event;

/// Configuration for the SMTP email service
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server host (e.g., smtp.gmail.com)
    pub smtp_host: String,
    /// SMTP server port (usually 587 for TLS, 465 for SSL)
    pub smtp_port: u16,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: String,
    /// Sender address
    pub from_email: String,
}

impl EmailConfig {
    /// Create email config from environment variables
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_email: std::env::var("FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@evently.local".to_string()),
        }
    }
}

/// Email delivery failure
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outbound mail seam
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one plain-text message to every recipient.
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), MailError>;
}

/// SMTP-backed mailer
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn create_transport(&self) -> SmtpTransport {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        SmtpTransport::builder_dangerous(&self.config.smtp_host)
            .port(self.config.smtp_port)
            .credentials(creds)
            .build()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        let from: Mailbox = self.config.from_email.parse()?;

        let mut builder = Message::builder()
            .from(from)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN);
        for recipient in recipients {
            builder = builder.to(recipient.parse()?);
        }
        let message = builder.body(body.to_string())?;

        let transport = self.create_transport();
        transport.send(&message)?;
        Ok(())
    }
}

/// Compose the reminder for an event: subject and plain-text body.
pub fn reminder_email(event: &event::Model) -> (String, String) {
    let subject = format!("Reminder: {}", event.name);
    let body = format!(
        "Hello,\n\n\
         Reminder for the upcoming event:\n\n\
         Event: {}\n\
         Description: {}\n\
         Date: {} - {}\n\
         Location: {}\n\n\
         Please mark your calendar!\n\n\
         Best regards,\n\
         Event Management Team",
        event.name,
        event.description,
        event.start_date.to_rfc3339(),
        event.end_date.to_rfc3339(),
        event.location,
    );
    (subject, body)
}
