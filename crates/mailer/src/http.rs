//! HTTP email provider client.
//!
//! Speaks the JSON dialect used by transactional email providers such as
//! Resend: `POST {api_url}/emails` with a bearer token and a
//! `{from, to, subject, html}` body. Any non-success response is surfaced as
//! [`MailError::Provider`] with the provider's own error text.

use crate::{EmailMessage, MailError, Mailer};
use std::time::Duration;

/// Default request timeout for provider calls.
///
/// Dispatch is the only potentially slow step in the submission flow, so it
/// must never block a request handler indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`HttpMailer`], injected at construction.
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Base URL of the provider API, e.g. `https://api.resend.com`.
    pub api_url: String,
    /// Bearer token for the provider API.
    pub api_key: String,
    /// Per-request timeout; defaults to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
}

/// Mailer backed by a JSON HTTP email API.
#[derive(Debug)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpMailer {
    /// Creates a new `HttpMailer` from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Config` if the API URL or key is empty, or
    /// `MailError::Transport` if the HTTP client cannot be built.
    pub fn new(config: HttpMailerConfig) -> Result<Self, MailError> {
        if config.api_url.trim().is_empty() {
            return Err(MailError::Config("api_url cannot be empty".into()));
        }
        if config.api_key.trim().is_empty() {
            return Err(MailError::Config("api_key cannot be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_url.trim_end_matches('/')),
            api_key: config.api_key,
        })
    }

    /// The fully-resolved provider endpoint messages are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        tracing::debug!(to = %message.to, subject = %message.subject, "dispatching email");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Provider {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str, api_key: &str) -> HttpMailerConfig {
        HttpMailerConfig {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    #[test]
    fn rejects_empty_api_url() {
        let err = HttpMailer::new(config("  ", "key")).expect_err("empty url should fail");
        assert!(matches!(err, MailError::Config(_)));
    }

    #[test]
    fn rejects_empty_api_key() {
        let err =
            HttpMailer::new(config("https://api.resend.com", "")).expect_err("empty key fails");
        assert!(matches!(err, MailError::Config(_)));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let mailer =
            HttpMailer::new(config("https://api.resend.com/", "key")).expect("valid config");
        assert_eq!(mailer.endpoint(), "https://api.resend.com/emails");
    }

    #[test]
    fn message_serializes_to_provider_shape() {
        let message = EmailMessage {
            from: "Agent <onboarding@example.dev>".into(),
            to: "admin@example.com".into(),
            subject: "Feedback from A".into(),
            html: "<p>hi</p>".into(),
        };
        let value = serde_json::to_value(&message).expect("serialize message");
        assert_eq!(value["from"], "Agent <onboarding@example.dev>");
        assert_eq!(value["to"], "admin@example.com");
        assert_eq!(value["subject"], "Feedback from A");
        assert_eq!(value["html"], "<p>hi</p>");
    }
}
