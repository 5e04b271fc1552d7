//! Test fixtures: identities, seeded properties, and response mirrors

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tenancy_common::JwtService;
use tenancy_core::{PropertyId, UserId};
use tenancy_db::PgPool;

use crate::helpers::TEST_JWT_SECRET;

/// An authenticated caller for the tests
pub struct TestIdentity {
    pub user_id: UserId,
    pub token: String,
}

impl TestIdentity {
    /// Mint a fresh identity with a valid bearer token
    pub fn new() -> Self {
        let user_id = UserId::generate();
        let jwt = JwtService::new(TEST_JWT_SECRET, 900);
        let token = jwt
            .issue_access_token(user_id)
            .expect("token minting cannot fail with a valid secret");
        Self { user_id, token }
    }
}

impl Default for TestIdentity {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert a property row and return its id
pub async fn seed_property(pool: &PgPool, display_name: &str) -> Result<PropertyId> {
    let id = PropertyId::generate();
    sqlx::query("INSERT INTO properties (id, display_name) VALUES ($1, $2)")
        .bind(id.into_inner())
        .bind(display_name)
        .execute(pool)
        .await?;
    Ok(id)
}

// ============================================================================
// Response body mirrors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct InviteSummaryBody {
    pub id: String,
    pub property_id: String,
    pub status: String,
    pub use_count: i32,
    pub max_uses: i32,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedInviteBody {
    pub token: String,
    pub invite: InviteSummaryBody,
}

#[derive(Debug, Deserialize)]
pub struct PropertyPreviewBody {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidationBody {
    pub status: String,
    pub reason: Option<String>,
    pub property: Option<PropertyPreviewBody>,
}

#[derive(Debug, Deserialize)]
pub struct AcceptBody {
    pub status: String,
    pub reason: Option<String>,
    pub linked_property_id: Option<String>,
}
