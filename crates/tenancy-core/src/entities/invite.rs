//! Invite record - the persisted metadata for one issued token

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{InviteId, PropertyId, UserId};

/// How the surrounding application intends to deliver the token.
///
/// Informational only; validation never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Shown to the landlord as a code to pass on out of band
    #[default]
    Code,
    /// Sent by the application to the recipient's email address
    Email,
}

impl DeliveryMethod {
    /// Storage representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a delivery method from its storage form
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown delivery method")]
pub struct ParseDeliveryMethodError;

impl FromStr for DeliveryMethod {
    type Err = ParseDeliveryMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "email" => Ok(Self::Email),
            _ => Err(ParseDeliveryMethodError),
        }
    }
}

/// Derived status of an invite record, computed on read.
///
/// When several states apply at once the reporting priority is
/// revoked > expired > exhausted > active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Active,
    Exhausted,
    Expired,
    Revoked,
}

/// Invite record entity.
///
/// Holds only digests of the token; the plaintext exists nowhere but in the
/// creation response handed back to the landlord-facing caller. Mutated only
/// by consumption (`use_count`) and revocation (`revoked_at`/`revoked_by`);
/// everything else is immutable after creation. Never deleted by this
/// subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRecord {
    pub id: InviteId,
    pub property_id: PropertyId,
    pub created_by: UserId,
    /// Salted verification digest, re-checked after load
    pub token_hash: String,
    /// Per-record salt, base64
    pub token_salt: String,
    /// Deterministic digest the store keys records by
    pub token_lookup: String,
    pub delivery_method: DeliveryMethod,
    /// Audit hint only; never consulted by validation
    pub intended_recipient: Option<String>,
    pub max_uses: i32,
    pub use_count: i32,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub revoked_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl InviteRecord {
    /// Create a new active record with a fresh id and `use_count = 0`
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        property_id: PropertyId,
        created_by: UserId,
        token_hash: String,
        token_salt: String,
        token_lookup: String,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: InviteId::generate(),
            property_id,
            created_by,
            token_hash,
            token_salt,
            token_lookup,
            delivery_method: DeliveryMethod::Code,
            intended_recipient: None,
            max_uses: 1,
            use_count: 0,
            expires_at: now + ttl,
            revoked_at: None,
            revoked_by: None,
            created_at: now,
        }
    }

    /// Set the delivery method
    #[must_use]
    pub fn with_delivery_method(mut self, method: DeliveryMethod) -> Self {
        self.delivery_method = method;
        self
    }

    /// Attach the intended recipient hint
    #[must_use]
    pub fn with_intended_recipient(mut self, recipient: Option<String>) -> Self {
        self.intended_recipient = recipient;
        self
    }

    /// Set the usage allowance (values below 1 are ignored)
    #[must_use]
    pub fn with_max_uses(mut self, max_uses: i32) -> Self {
        if max_uses >= 1 {
            self.max_uses = max_uses;
        }
        self
    }

    /// Check if the record has been revoked
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if the record is past its expiry at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if the usage allowance is fully consumed
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.use_count >= self.max_uses
    }

    /// Remaining uses
    #[must_use]
    pub fn remaining_uses(&self) -> i32 {
        (self.max_uses - self.use_count).max(0)
    }

    /// Derived status at `now`, applying the reporting priority
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> InviteStatus {
        if self.is_revoked() {
            InviteStatus::Revoked
        } else if self.is_expired(now) {
            InviteStatus::Expired
        } else if self.is_exhausted() {
            InviteStatus::Exhausted
        } else {
            InviteStatus::Active
        }
    }
}
