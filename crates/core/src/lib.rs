//! # Plaudit Core
//!
//! Core business logic for the plaudit testimonial service.
//!
//! This crate contains the two components the system is built around:
//! - The in-memory [`store::FeedbackStore`]: the authoritative collection of
//!   testimonial records with moderation and change notification.
//! - The [`intake::IntakeService`]: validates an inbound submission and
//!   dispatches a notification through the external email collaborator.
//!
//! The two are deliberately independent. Submissions are emailed to the
//! configured recipient; testimonial records enter the store through the
//! moderation surface. Composition, if any, happens in the API layer.
//!
//! **No API concerns**: HTTP servers, wire DTOs, and authentication belong
//! in `api-rest` and `api-shared`.

pub mod error;
pub mod id;
pub mod intake;
pub mod record;
pub mod store;

pub use error::{FeedbackError, FeedbackResult};
pub use id::FeedbackId;
pub use intake::{IntakeConfig, IntakeError, IntakeService, Submission, SubmitReceipt};
pub use record::{Feedback, FeedbackPatch, NewFeedback};
pub use store::{FeedbackStore, Subscription};
