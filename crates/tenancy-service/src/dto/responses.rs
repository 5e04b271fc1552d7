//! Response DTOs
//!
//! Responses carry reason codes and display metadata only: no digests, no
//! salts, and - outside the one-time creation response - no plaintext
//! token. Validate and accept responses share one structural shape so a
//! caller cannot tell how far a rejected candidate progressed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tenancy_core::entities::{InviteRecord, InviteStatus};
use tenancy_core::traits::PropertyPreview;
use tenancy_core::validator::RejectReason;
use tenancy_core::value_objects::PropertyId;

/// Summary of an invite record for the landlord-facing surface
#[derive(Debug, Clone, Serialize)]
pub struct InviteSummaryResponse {
    pub id: String,
    pub property_id: String,
    pub status: InviteStatus,
    pub delivery_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended_recipient: Option<String>,
    pub use_count: i32,
    pub max_uses: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl InviteSummaryResponse {
    /// Build a summary from a record, deriving status at `now`
    #[must_use]
    pub fn from_record(record: &InviteRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: record.id.to_string(),
            property_id: record.property_id.to_string(),
            status: record.status(now),
            delivery_method: record.delivery_method.to_string(),
            intended_recipient: record.intended_recipient.clone(),
            use_count: record.use_count,
            max_uses: record.max_uses,
            created_at: record.created_at,
            expires_at: record.expires_at,
            revoked_at: record.revoked_at,
        }
    }
}

/// Creation response: the only place the plaintext token ever appears
#[derive(Debug, Clone, Serialize)]
pub struct InviteCreatedResponse {
    pub token: String,
    pub invite: InviteSummaryResponse,
}

/// Minimal property info shown to a tenant before acceptance
#[derive(Debug, Clone, Serialize)]
pub struct PropertyPreviewResponse {
    pub id: String,
    pub display_name: String,
}

impl From<PropertyPreview> for PropertyPreviewResponse {
    fn from(preview: PropertyPreview) -> Self {
        Self {
            id: preview.id.to_string(),
            display_name: preview.display_name,
        }
    }
}

/// Outcome of a validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    Invalid,
}

/// Validation response: same shape for every outcome, only the fields'
/// contents differ
#[derive(Debug, Clone, Serialize)]
pub struct InviteValidationResponse {
    pub status: ValidationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyPreviewResponse>,
}

impl InviteValidationResponse {
    /// An acceptable token, with the preview the tenant UI renders
    #[must_use]
    pub fn valid(property: Option<PropertyPreviewResponse>) -> Self {
        Self {
            status: ValidationStatus::Valid,
            reason: None,
            property,
        }
    }

    /// A rejected token
    #[must_use]
    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            status: ValidationStatus::Invalid,
            reason: Some(reason),
            property: None,
        }
    }
}

/// Outcome of an accept call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptStatus {
    Accepted,
    Rejected,
}

/// Accept response
#[derive(Debug, Clone, Serialize)]
pub struct InviteAcceptedResponse {
    pub status: AcceptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_property_id: Option<String>,
}

impl InviteAcceptedResponse {
    /// The tenant was linked to the property
    #[must_use]
    pub fn accepted(property_id: PropertyId) -> Self {
        Self {
            status: AcceptStatus::Accepted,
            reason: None,
            linked_property_id: Some(property_id.to_string()),
        }
    }

    /// The token was not redeemable
    #[must_use]
    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            status: AcceptStatus::Rejected,
            reason: Some(reason),
            linked_property_id: None,
        }
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool) -> Self {
        Self {
            ready: database,
            database,
        }
    }
}
