//! JSON wire types for the REST API.
//!
//! Wire shapes are plain strings and integers; validation into the core's
//! typed domain happens at the handler boundary. The testimonial body
//! travels under the field name `feedback`, matching the submission form's
//! payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health probe response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Generic error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Inbound feedback submission (intake endpoint).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackReq {
    pub name: String,
    pub email: String,
    pub title: String,
    pub feedback: String,
    pub rating: u8,
}

/// Intake confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackRes {
    pub success: bool,
    pub message: String,
}

/// One testimonial record on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub title: String,
    pub feedback: String,
    pub rating: u8,
    pub approved: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Listing response for both the full and the approved-only views.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListTestimonialsRes {
    pub testimonials: Vec<Testimonial>,
}

/// Moderation: create a testimonial record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTestimonialReq {
    pub name: String,
    pub title: String,
    pub feedback: String,
    pub rating: u8,
}

/// Moderation: partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTestimonialReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub approved: Option<bool>,
}

/// Moderation: set only the approval flag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetApprovalReq {
    pub approved: bool,
}

/// Acknowledgement for approval changes and deletions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessRes {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_req_uses_feedback_field_name() {
        let req: SubmitFeedbackReq = serde_json::from_str(
            r#"{"name":"A","email":"a@b.com","title":"T","feedback":"hi","rating":4}"#,
        )
        .expect("payload should deserialize");
        assert_eq!(req.feedback, "hi");
        assert_eq!(req.rating, 4);
    }

    #[test]
    fn update_req_fields_default_to_absent() {
        let req: UpdateTestimonialReq =
            serde_json::from_str(r#"{"approved":true}"#).expect("partial body");
        assert_eq!(req.approved, Some(true));
        assert!(req.name.is_none());
        assert!(req.rating.is_none());
    }
}
