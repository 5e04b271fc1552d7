//! Store and collaborator ports
//!
//! The domain layer defines what it needs; the infrastructure layer (or the
//! surrounding application, for the collaborators) provides the
//! implementation. The store owns the only mutable state in the subsystem
//! and must enforce the consume precondition atomically - an in-process lock
//! is not sufficient when the store is shared across instances.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::InviteRecord;
use crate::error::DomainError;
use crate::value_objects::{InviteId, PropertyId, UserId};

/// Result type for store and collaborator operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Durable, concurrency-safe persistence of invite records
#[async_trait]
pub trait InviteStore: Send + Sync {
    /// Persist a new record.
    ///
    /// Fails with [`DomainError::DuplicateTokenDigest`] when the lookup
    /// digest is already present; the caller regenerates the token and
    /// retries.
    async fn insert(&self, record: &InviteRecord) -> StoreResult<()>;

    /// Load a record by its lookup digest.
    ///
    /// Absence is reported as `Ok(None)`; the read path must not
    /// distinguish malformed input from a genuinely missing record.
    async fn find_by_lookup(&self, lookup_digest: &str) -> StoreResult<Option<InviteRecord>>;

    /// Load a record by id
    async fn find_by_id(&self, id: InviteId) -> StoreResult<Option<InviteRecord>>;

    /// List all records issued for a property, newest first
    async fn find_by_property(&self, property_id: PropertyId) -> StoreResult<Vec<InviteRecord>>;

    /// Atomically consume one use.
    ///
    /// Increments `use_count` only if the record exists, is not revoked,
    /// is not expired at `now`, and `use_count` still equals
    /// `expected_use_count` (and is below `max_uses`) - evaluated and
    /// mutated as a single indivisible unit, so two callers racing on the
    /// last use cannot both succeed.
    ///
    /// Returns [`DomainError::ConsumeConflict`] when the precondition no
    /// longer holds and [`DomainError::InviteNotFound`] when no record
    /// exists.
    async fn try_consume(
        &self,
        id: InviteId,
        expected_use_count: i32,
        now: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Compensating action: undo one consumption after a downstream
    /// linking failure. Decrements `use_count` if it is above zero.
    async fn release_use(&self, id: InviteId) -> StoreResult<()>;

    /// Revoke a record exactly once.
    ///
    /// Returns [`DomainError::AlreadyRevoked`] on a second attempt; the
    /// original `revoked_at`/`revoked_by` are never overwritten.
    async fn revoke(&self, id: InviteId, revoked_by: UserId, now: DateTime<Utc>) -> StoreResult<()>;
}

/// Linking collaborator, supplied by the surrounding application.
///
/// Invoked after a successful consume; a failure here triggers the
/// coordinator's compensation path.
#[async_trait]
pub trait TenantLinker: Send + Sync {
    /// Create the tenant-property relationship
    async fn link_tenant(&self, tenant: UserId, property: PropertyId) -> StoreResult<()>;
}

/// Minimal property metadata safe to show a tenant before acceptance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPreview {
    pub id: PropertyId,
    pub display_name: String,
}

/// Read-only property lookup, supplied by the surrounding application
#[async_trait]
pub trait PropertyDirectory: Send + Sync {
    /// Fetch the preview for a property, if it exists
    async fn preview(&self, property_id: PropertyId) -> StoreResult<Option<PropertyPreview>>;
}

/// Time source. Expiry is evaluated lazily against this clock; there is no
/// background sweep.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
