//! Outbound notifications
//!
//! Attendee reminder emails, delivered over SMTP.

pub mod mailer;

pub use mailer::{EmailConfig, MailError, Mailer, SmtpMailer};
