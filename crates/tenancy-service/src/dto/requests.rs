//! Request DTOs
//!
//! Closed parameter structs; unspecified knobs fall back to the configured
//! invite policy, not to constants buried in the coordinator.

use serde::Deserialize;
use tenancy_core::DeliveryMethod;
use validator::Validate;

/// Create invite request body. All fields optional; an empty body issues a
/// single-use, 48-hour (policy default) code invite.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInviteRequest {
    /// How the caller intends to deliver the token
    #[serde(default)]
    pub delivery_method: DeliveryMethod,

    /// Audit hint of who the token is meant for; never enforced
    #[validate(email)]
    pub intended_recipient: Option<String>,

    /// Lifetime override in seconds (1 minute to 90 days)
    #[validate(range(min = 60, max = 7_776_000))]
    pub ttl_seconds: Option<i64>,

    /// Usage allowance override
    #[validate(range(min = 1, max = 100))]
    pub max_uses: Option<i32>,
}
