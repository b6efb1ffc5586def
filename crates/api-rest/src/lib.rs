//! # API REST
//!
//! REST API implementation for the plaudit testimonial service.
//!
//! Handles:
//! - HTTP endpoints with axum (intake + moderation surface)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, panic containment)
//!
//! Uses `api-shared` for wire types and the API-key check, and
//! `plaudit-core` for the feedback store and intake service. The intake
//! endpoint and the testimonial store are two independent features: a
//! submission results in a notification email, while testimonial records
//! are managed through the moderation routes.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::auth;
use api_shared::dto::{
    CreateTestimonialReq, ErrorRes, HealthRes, ListTestimonialsRes, SetApprovalReq,
    SubmitFeedbackReq, SubmitFeedbackRes, SuccessRes, Testimonial, UpdateTestimonialReq,
};
use api_shared::HealthService;
use plaudit_core::{
    Feedback, FeedbackId, FeedbackPatch, FeedbackStore, IntakeError, IntakeService, NewFeedback,
    Submission,
};
use plaudit_types::{NonEmptyText, Rating};

/// Application state shared across REST API handlers.
///
/// The store and the intake service are constructed once at startup and
/// injected here; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    store: Arc<FeedbackStore>,
    intake: Arc<IntakeService>,
    admin_api_key: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<FeedbackStore>,
        intake: Arc<IntakeService>,
        admin_api_key: Option<String>,
    ) -> Self {
        Self {
            store,
            intake,
            admin_api_key,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        submit_feedback,
        list_testimonials,
        create_testimonial,
        list_approved_testimonials,
        update_testimonial,
        set_testimonial_approval,
        delete_testimonial,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        SubmitFeedbackReq,
        SubmitFeedbackRes,
        Testimonial,
        ListTestimonialsRes,
        CreateTestimonialReq,
        UpdateTestimonialReq,
        SetApprovalReq,
        SuccessRes,
    ))
)]
struct ApiDoc;

/// Builds the REST router with all routes, documentation, and layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/feedback", post(submit_feedback))
        .route("/testimonials", get(list_testimonials))
        .route("/testimonials", post(create_testimonial))
        .route("/testimonials/approved", get(list_approved_testimonials))
        .route("/testimonials/:id", put(update_testimonial))
        .route("/testimonials/:id", delete(delete_testimonial))
        .route("/testimonials/:id/approval", put(set_testimonial_approval))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorRes>);

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: message.to_owned(),
        }),
    )
}

/// Converts any handler panic into a generic JSON 500.
///
/// Nothing that goes wrong inside a handler may crash the process.
fn handle_panic(_panic: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    tracing::error!("request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes {
            error: "Internal Server Error".into(),
        }),
    )
        .into_response()
}

/// Checks the `x-api-key` header for moderation routes.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let provided = headers.get("x-api-key").and_then(|value| value.to_str().ok());

    auth::validate_api_key(provided, state.admin_api_key.as_deref()).map_err(|err| {
        tracing::warn!("moderation request rejected: {err}");
        error_response(StatusCode::UNAUTHORIZED, "Unauthorized")
    })
}

fn parse_id(id: &str) -> Result<FeedbackId, ApiError> {
    FeedbackId::parse(id).map_err(|err| {
        tracing::warn!("invalid testimonial id: {err}");
        error_response(StatusCode::BAD_REQUEST, "Invalid testimonial id")
    })
}

fn to_wire(record: Feedback) -> Testimonial {
    Testimonial {
        id: record.id.to_string(),
        name: record.name.into_inner(),
        title: record.title.into_inner(),
        feedback: record.body.into_inner(),
        rating: record.rating.get(),
        approved: record.approved,
        created_at: record.created_at.to_rfc3339(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint, used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/feedback",
    request_body = SubmitFeedbackReq,
    responses(
        (status = 200, description = "Feedback accepted and notification dispatched", body = SubmitFeedbackRes),
        (status = 400, description = "Missing required fields", body = ErrorRes),
        (status = 500, description = "Notification dispatch failed", body = ErrorRes)
    )
)]
/// Accepts a feedback submission from the public form.
///
/// Validates the payload and dispatches a notification email to the
/// configured recipient. Submissions are not written to the testimonial
/// store; records enter the store through the moderation surface.
#[axum::debug_handler]
async fn submit_feedback(
    State(state): State<AppState>,
    Json(req): Json<SubmitFeedbackReq>,
) -> Result<Json<SubmitFeedbackRes>, ApiError> {
    let submission = Submission {
        name: req.name,
        email: req.email,
        title: req.title,
        body: req.feedback,
        rating: req.rating,
    };

    match state.intake.submit(submission).await {
        Ok(receipt) => Ok(Json(SubmitFeedbackRes {
            success: true,
            message: receipt.message,
        })),
        Err(IntakeError::Validation) => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
        )),
        Err(IntakeError::Dispatch(err)) => {
            tracing::error!("Feedback dispatch error: {:?}", err);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send admin email",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/testimonials",
    responses(
        (status = 200, description = "Every testimonial, newest first", body = ListTestimonialsRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Lists all testimonials, including unapproved ones (moderation view).
#[axum::debug_handler]
async fn list_testimonials(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListTestimonialsRes>, ApiError> {
    require_admin(&state, &headers)?;

    let testimonials = state.store.list_all().into_iter().map(to_wire).collect();
    Ok(Json(ListTestimonialsRes { testimonials }))
}

#[utoipa::path(
    get,
    path = "/testimonials/approved",
    responses(
        (status = 200, description = "Approved testimonials, newest first", body = ListTestimonialsRes)
    )
)]
/// Lists approved testimonials for public display.
#[axum::debug_handler]
async fn list_approved_testimonials(
    State(state): State<AppState>,
) -> Json<ListTestimonialsRes> {
    let testimonials = state
        .store
        .list_approved()
        .into_iter()
        .map(to_wire)
        .collect();
    Json(ListTestimonialsRes { testimonials })
}

#[utoipa::path(
    post,
    path = "/testimonials",
    request_body = CreateTestimonialReq,
    responses(
        (status = 200, description = "Testimonial created, unapproved", body = Testimonial),
        (status = 400, description = "Invalid fields", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes)
    )
)]
/// Creates a testimonial record (moderation surface).
#[axum::debug_handler]
async fn create_testimonial(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTestimonialReq>,
) -> Result<Json<Testimonial>, ApiError> {
    require_admin(&state, &headers)?;

    let input = NewFeedback::new(&req.name, &req.title, &req.feedback, req.rating)
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, &err.to_string()))?;

    let record = state.store.add(input);
    Ok(Json(to_wire(record)))
}

#[utoipa::path(
    put,
    path = "/testimonials/{id}",
    request_body = UpdateTestimonialReq,
    params(
        ("id" = String, Path, description = "Testimonial id")
    ),
    responses(
        (status = 200, description = "Testimonial updated", body = Testimonial),
        (status = 400, description = "Invalid id or fields", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "Unknown testimonial id", body = ErrorRes)
    )
)]
/// Applies a partial update to a testimonial (moderation surface).
///
/// `id` and `created_at` are immutable; the request body cannot express
/// them.
#[axum::debug_handler]
async fn update_testimonial(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateTestimonialReq>,
) -> Result<Json<Testimonial>, ApiError> {
    require_admin(&state, &headers)?;
    let id = parse_id(&id)?;

    let invalid = |err: &dyn std::fmt::Display| {
        error_response(StatusCode::BAD_REQUEST, &err.to_string())
    };

    let mut patch = FeedbackPatch::default();
    if let Some(name) = req.name {
        patch.name = Some(NonEmptyText::new(&name).map_err(|e| invalid(&e))?);
    }
    if let Some(title) = req.title {
        patch.title = Some(NonEmptyText::new(&title).map_err(|e| invalid(&e))?);
    }
    if let Some(feedback) = req.feedback {
        patch.body = Some(NonEmptyText::new(&feedback).map_err(|e| invalid(&e))?);
    }
    if let Some(rating) = req.rating {
        patch.rating = Some(Rating::new(rating).map_err(|e| invalid(&e))?);
    }
    patch.approved = req.approved;

    match state.store.update(&id, patch) {
        Some(record) => Ok(Json(to_wire(record))),
        None => Err(error_response(StatusCode::NOT_FOUND, "Testimonial not found")),
    }
}

#[utoipa::path(
    put,
    path = "/testimonials/{id}/approval",
    request_body = SetApprovalReq,
    params(
        ("id" = String, Path, description = "Testimonial id")
    ),
    responses(
        (status = 200, description = "Approval flag updated", body = SuccessRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "Unknown testimonial id", body = ErrorRes)
    )
)]
/// Approves or unapproves a testimonial (moderation surface).
#[axum::debug_handler]
async fn set_testimonial_approval(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    headers: HeaderMap,
    Json(req): Json<SetApprovalReq>,
) -> Result<Json<SuccessRes>, ApiError> {
    require_admin(&state, &headers)?;
    let id = parse_id(&id)?;

    if state.store.set_approval(&id, req.approved) {
        Ok(Json(SuccessRes { success: true }))
    } else {
        Err(error_response(StatusCode::NOT_FOUND, "Testimonial not found"))
    }
}

#[utoipa::path(
    delete,
    path = "/testimonials/{id}",
    params(
        ("id" = String, Path, description = "Testimonial id")
    ),
    responses(
        (status = 200, description = "Testimonial deleted", body = SuccessRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "Unknown testimonial id", body = ErrorRes)
    )
)]
/// Deletes a testimonial (moderation surface).
#[axum::debug_handler]
async fn delete_testimonial(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    headers: HeaderMap,
) -> Result<Json<SuccessRes>, ApiError> {
    require_admin(&state, &headers)?;
    let id = parse_id(&id)?;

    if state.store.remove(&id) {
        Ok(Json(SuccessRes { success: true }))
    } else {
        Err(error_response(StatusCode::NOT_FOUND, "Testimonial not found"))
    }
}
