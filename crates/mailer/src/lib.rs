//! Outbound email collaborator.
//!
//! The rest of the system depends only on the [`Mailer`] trait: hand it a
//! composed [`EmailMessage`] and it either delivers the message or reports a
//! [`MailError`]. Two implementations ship with the crate:
//!
//! - [`HttpMailer`] — talks to a JSON email API (Resend-style `/emails`
//!   endpoint with bearer auth) over HTTPS with a bounded request timeout.
//! - [`MockMailer`] — records messages in memory and can be scripted to
//!   fail; intended for tests.
//!
//! Provider credentials and endpoints are injected through
//! [`HttpMailerConfig`]; nothing in this crate reads the environment.

pub mod http;
pub mod mock;

pub use http::{HttpMailer, HttpMailerConfig};
pub use mock::MockMailer;

/// A single outbound email message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Errors produced while configuring or using a mailer.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mailer configuration: {0}")]
    Config(String),
    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email provider rejected the message (status {status}): {message}")]
    Provider { status: u16, message: String },
}

/// The capability of transmitting one email message.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// from concurrent request handlers.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Attempts to deliver the message exactly once.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}
