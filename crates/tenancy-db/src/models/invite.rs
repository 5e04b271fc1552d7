//! Invite database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the property_invites table
#[derive(Debug, Clone, FromRow)]
pub struct InviteRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub created_by: Uuid,
    pub token_hash: String,
    pub token_salt: String,
    pub token_lookup: String,
    pub delivery_method: String,
    pub intended_recipient: Option<String>,
    pub max_uses: i32,
    pub use_count: i32,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub revoked_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl InviteRow {
    /// Check if the row is revoked
    #[inline]
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if the usage allowance is fully consumed
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.use_count >= self.max_uses
    }
}
