//! Route definitions
//!
//! All API routes mounted under /api/v1. Each logical operation has exactly
//! one route, which keeps per-endpoint rate limiting and identity
//! extraction straightforward at the deployment layer.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{health, invites};
use crate::state::AppState;

/// Create the main API router (excluding health, which bypasses rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Landlord surface
        .route(
            "/properties/:property_id/invites",
            post(invites::create_invite),
        )
        .route(
            "/properties/:property_id/invites",
            get(invites::list_property_invites),
        )
        .route("/invites/:invite_id", delete(invites::revoke_invite))
        // Tenant surface
        .route("/invites/validate", get(invites::validate_invite))
        .route("/invites/accept", post(invites::accept_invite))
}
