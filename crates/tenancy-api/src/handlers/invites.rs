//! Invite handlers
//!
//! Endpoints for the invite lifecycle. The token travels as the single
//! opaque `t` query parameter on the tenant-facing endpoints - the same
//! shape as the deep links the application hands out - so it never appears
//! in a path segment that access logs record.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tenancy_core::{InviteId, PropertyId};
use tenancy_service::{
    CreateInviteRequest, InviteAcceptedResponse, InviteCreatedResponse, InviteService,
    InviteSummaryResponse, InviteValidationResponse,
};

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Token query parameter, as carried by invite links (`...?t=<token>`)
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    t: String,
}

/// Create an invite for a property
///
/// POST /properties/{property_id}/invites
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(property_id): Path<String>,
    body: Option<Json<CreateInviteRequest>>,
) -> ApiResult<Created<Json<InviteCreatedResponse>>> {
    let property_id: PropertyId = property_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid property_id format"))?;

    // Use policy defaults if no body provided
    let request = body.map(|j| j.0).unwrap_or_default();

    let service = InviteService::new(state.service_context());
    let response = service
        .create_invite(property_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List invites for a property
///
/// GET /properties/{property_id}/invites
pub async fn list_property_invites(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(property_id): Path<String>,
) -> ApiResult<Json<Vec<InviteSummaryResponse>>> {
    let property_id: PropertyId = property_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid property_id format"))?;

    let service = InviteService::new(state.service_context());
    let invites = service.list_property_invites(property_id).await?;
    Ok(Json(invites))
}

/// Validate an invite token (no auth required, read-only)
///
/// GET /invites/validate?t={token}
pub async fn validate_invite(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> ApiResult<Json<InviteValidationResponse>> {
    let service = InviteService::new(state.service_context());
    let response = service.validate_invite(&query.t).await?;
    Ok(Json(response))
}

/// Accept an invite token, linking the caller to the property
///
/// POST /invites/accept?t={token}
pub async fn accept_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TokenQuery>,
) -> ApiResult<Json<InviteAcceptedResponse>> {
    let service = InviteService::new(state.service_context());
    let response = service.accept_invite(&query.t, auth.user_id).await?;
    Ok(Json(response))
}

/// Revoke an invite
///
/// DELETE /invites/{invite_id}
pub async fn revoke_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(invite_id): Path<String>,
) -> ApiResult<NoContent> {
    let invite_id: InviteId = invite_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid invite_id format"))?;

    let service = InviteService::new(state.service_context());
    service.revoke_invite(invite_id, auth.user_id).await?;
    Ok(NoContent)
}
