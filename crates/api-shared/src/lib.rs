//! # API Shared
//!
//! Shared utilities and definitions for the plaudit API surface.
//!
//! Contains:
//! - Wire DTOs for the JSON REST API (`dto` module)
//! - Shared services like `HealthService`
//! - Authentication utilities (API-key verification)
//!
//! Used by `api-rest` and the admin CLI for common request/response shapes.

pub mod auth;
pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
