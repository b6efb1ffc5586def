//! The feedback record and its input/patch shapes.

use crate::error::FeedbackResult;
use crate::id::FeedbackId;
use chrono::{DateTime, Utc};
use plaudit_types::{NonEmptyText, Rating};

/// One testimonial submission with its moderation status.
///
/// `id` and `created_at` are set once at creation and never change. The
/// field values are validated newtypes, so a `Feedback` in hand is always
/// well-formed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub name: NonEmptyText,
    pub title: NonEmptyText,
    pub body: NonEmptyText,
    pub rating: Rating,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a record.
///
/// Carries only the submitter-controlled fields; id, approval status, and
/// creation time are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: NonEmptyText,
    pub title: NonEmptyText,
    pub body: NonEmptyText,
    pub rating: Rating,
}

impl NewFeedback {
    /// Validates raw field values into a `NewFeedback`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any text field is empty (after
    /// trimming) or the rating is outside 1..=5.
    pub fn new(name: &str, title: &str, body: &str, rating: u8) -> FeedbackResult<Self> {
        Ok(Self {
            name: NonEmptyText::new(name)?,
            title: NonEmptyText::new(title)?,
            body: NonEmptyText::new(body)?,
            rating: Rating::new(rating)?,
        })
    }
}

/// A partial update to an existing record.
///
/// Only the fields present here are patchable; `id` and `created_at` are
/// immutable by construction (the patch has no way to express them).
#[derive(Debug, Clone, Default)]
pub struct FeedbackPatch {
    pub name: Option<NonEmptyText>,
    pub title: Option<NonEmptyText>,
    pub body: Option<NonEmptyText>,
    pub rating: Option<Rating>,
    pub approved: Option<bool>,
}

impl FeedbackPatch {
    /// True when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.title.is_none()
            && self.body.is_none()
            && self.rating.is_none()
            && self.approved.is_none()
    }

    /// Merges the patch into `record`, field by field.
    pub(crate) fn apply(self, record: &mut Feedback) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(body) = self.body {
            record.body = body;
        }
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
        if let Some(approved) = self.approved {
            record.approved = approved;
        }
    }
}
