//! In-memory mailer for tests.

use crate::{EmailMessage, MailError, Mailer};
use std::sync::Mutex;

/// A [`Mailer`] that records every message instead of sending it.
///
/// Construct with [`MockMailer::new`] for an always-succeeding mailer or
/// [`MockMailer::failing`] for one that rejects every dispatch. Recorded
/// messages are available through [`MockMailer::sent`].
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failure: Option<String>,
}

impl MockMailer {
    /// An always-succeeding mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that fails every `send` with the given provider message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Messages successfully "sent" so far, in dispatch order.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mock mailer lock poisoned").clone()
    }
}

#[async_trait::async_trait]
impl Mailer for MockMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        if let Some(failure) = &self.failure {
            return Err(MailError::Provider {
                status: 500,
                message: failure.clone(),
            });
        }

        self.sent
            .lock()
            .expect("mock mailer lock poisoned")
            .push(message.clone());
        Ok(())
    }
}
