//! Feedback submission intake.
//!
//! The intake service is the boundary between a raw submission payload and
//! the outbound notification email: validate, render, dispatch, respond.
//! There is no intermediate state and exactly one dispatch attempt per
//! successfully validated submission.
//!
//! The service does not touch the feedback store; submissions notify the
//! configured recipient and nothing else.

use crate::error::{FeedbackError, FeedbackResult};
use mailer::{EmailMessage, MailError, Mailer};
use plaudit_types::{NonEmptyText, Rating};
use std::sync::Arc;

/// Confirmation text returned to the submitter on success.
const THANK_YOU_MESSAGE: &str = "Thank you for your feedback!";

/// Intake configuration, injected at construction.
///
/// Both addresses are required; the service never falls back to built-in
/// defaults.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    recipient: String,
    from_address: String,
}

impl IntakeConfig {
    /// Creates the configuration, rejecting empty addresses.
    pub fn new(
        recipient: impl Into<String>,
        from_address: impl Into<String>,
    ) -> FeedbackResult<Self> {
        let recipient = recipient.into();
        let from_address = from_address.into();

        if recipient.trim().is_empty() {
            return Err(FeedbackError::InvalidInput(
                "recipient cannot be empty".into(),
            ));
        }
        if from_address.trim().is_empty() {
            return Err(FeedbackError::InvalidInput(
                "from_address cannot be empty".into(),
            ));
        }

        Ok(Self {
            recipient,
            from_address,
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }
}

/// A raw submission payload, as received from the outside.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub title: String,
    pub body: String,
    pub rating: u8,
}

/// Successful intake outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Human-readable confirmation for the submitter.
    pub message: String,
}

/// Errors surfaced by [`IntakeService::submit`].
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// A required field was empty or the rating was out of range.
    #[error("Missing required fields")]
    Validation,
    /// The email collaborator reported failure.
    #[error("failed to dispatch notification email: {0}")]
    Dispatch(#[from] MailError),
}

/// Accepts submissions and dispatches notification emails.
///
/// The mailer is an injected collaborator; swap in a mock for tests.
pub struct IntakeService {
    mailer: Arc<dyn Mailer>,
    config: IntakeConfig,
}

impl IntakeService {
    pub fn new(mailer: Arc<dyn Mailer>, config: IntakeConfig) -> Self {
        Self { mailer, config }
    }

    /// Validates the submission and dispatches the notification email.
    ///
    /// # Errors
    ///
    /// - `IntakeError::Validation` if any field is empty or the rating is
    ///   outside 1..=5; the mailer is not invoked in that case.
    /// - `IntakeError::Dispatch` if the email collaborator fails; the
    ///   failure is a returned value, never a panic.
    pub async fn submit(&self, submission: Submission) -> Result<SubmitReceipt, IntakeError> {
        let name =
            NonEmptyText::new(&submission.name).map_err(|_| IntakeError::Validation)?;
        let email =
            NonEmptyText::new(&submission.email).map_err(|_| IntakeError::Validation)?;
        let title =
            NonEmptyText::new(&submission.title).map_err(|_| IntakeError::Validation)?;
        let body =
            NonEmptyText::new(&submission.body).map_err(|_| IntakeError::Validation)?;
        let rating = Rating::new(submission.rating).map_err(|_| IntakeError::Validation)?;

        let message = EmailMessage {
            from: self.config.from_address.clone(),
            to: self.config.recipient.clone(),
            subject: format!("Feedback from {name}"),
            html: render_notification(&name, &email, &title, &body, rating),
        };

        self.mailer.send(&message).await?;
        tracing::info!(from = %name, rating = rating.get(), "feedback notification dispatched");

        Ok(SubmitReceipt {
            message: THANK_YOU_MESSAGE.to_owned(),
        })
    }
}

/// Renders the notification body sent to the configured recipient.
fn render_notification(
    name: &NonEmptyText,
    email: &NonEmptyText,
    title: &NonEmptyText,
    body: &NonEmptyText,
    rating: Rating,
) -> String {
    let stars = rating.stars();
    let body_html = body.as_str().replace('\n', "<br>");

    format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;\">\n",
            "  <h2>New Feedback Received</h2>\n",
            "  <p><strong>From:</strong> {name}</p>\n",
            "  <p><strong>Email:</strong> {email}</p>\n",
            "  <p><strong>Title/Profession:</strong> {title}</p>\n",
            "  <p><strong>Rating:</strong> {stars} ({rating}/5)</p>\n",
            "  <hr />\n",
            "  <h3>Feedback:</h3>\n",
            "  <p>{body}</p>\n",
            "</div>",
        ),
        name = name,
        email = email,
        title = title,
        stars = stars,
        rating = rating.get(),
        body = body_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailer::MockMailer;

    fn valid_submission() -> Submission {
        Submission {
            name: "A".into(),
            email: "a@b.com".into(),
            title: "T".into(),
            body: "hi".into(),
            rating: 4,
        }
    }

    fn service_with(mailer: Arc<MockMailer>) -> IntakeService {
        let config = IntakeConfig::new("admin@example.com", "Agent <onboarding@example.dev>")
            .expect("valid config");
        IntakeService::new(mailer, config)
    }

    #[test]
    fn config_rejects_empty_addresses() {
        assert!(IntakeConfig::new("", "from@example.com").is_err());
        assert!(IntakeConfig::new("to@example.com", "  ").is_err());
    }

    #[tokio::test]
    async fn valid_submission_dispatches_and_thanks() {
        let mailer = Arc::new(MockMailer::new());
        let service = service_with(mailer.clone());

        let receipt = service
            .submit(valid_submission())
            .await
            .expect("submission should succeed");
        assert_eq!(receipt.message, "Thank you for your feedback!");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1, "exactly one dispatch attempt");
        assert_eq!(sent[0].to, "admin@example.com");
        assert_eq!(sent[0].from, "Agent <onboarding@example.dev>");
        assert_eq!(sent[0].subject, "Feedback from A");
        assert!(sent[0].html.contains("★★★★☆"), "rating 4 renders as 4 of 5");
        assert!(sent[0].html.contains("a@b.com"));
        assert!(sent[0].html.contains("hi"));
    }

    #[tokio::test]
    async fn missing_fields_fail_without_invoking_mailer() {
        let mailer = Arc::new(MockMailer::new());
        let service = service_with(mailer.clone());

        for submission in [
            Submission {
                name: "".into(),
                ..valid_submission()
            },
            Submission {
                email: "  ".into(),
                ..valid_submission()
            },
            Submission {
                title: "".into(),
                ..valid_submission()
            },
            Submission {
                body: "".into(),
                ..valid_submission()
            },
            Submission {
                rating: 0,
                ..valid_submission()
            },
            Submission {
                rating: 6,
                ..valid_submission()
            },
        ] {
            let err = service
                .submit(submission)
                .await
                .expect_err("invalid submission should fail");
            assert!(matches!(err, IntakeError::Validation));
        }

        assert!(mailer.sent().is_empty(), "mailer never invoked");
    }

    #[tokio::test]
    async fn mailer_failure_surfaces_as_dispatch_error() {
        let mailer = Arc::new(MockMailer::failing("provider down"));
        let service = service_with(mailer);

        let err = service
            .submit(valid_submission())
            .await
            .expect_err("dispatch should fail");
        assert!(matches!(err, IntakeError::Dispatch(_)));
    }

    #[tokio::test]
    async fn multiline_body_is_rendered_with_breaks() {
        let mailer = Arc::new(MockMailer::new());
        let service = service_with(mailer.clone());

        service
            .submit(Submission {
                body: "line one\nline two".into(),
                ..valid_submission()
            })
            .await
            .expect("submission should succeed");

        assert!(mailer.sent()[0].html.contains("line one<br>line two"));
    }
}
