//! PostgreSQL implementation of the InviteStore port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use tenancy_core::entities::InviteRecord;
use tenancy_core::error::DomainError;
use tenancy_core::traits::{InviteStore, StoreResult};
use tenancy_core::value_objects::{InviteId, PropertyId, UserId};

use crate::models::InviteRow;

use super::error::{map_db_error, map_unique_violation};

const INVITE_COLUMNS: &str = "id, property_id, created_by, token_hash, token_salt, token_lookup, \
     delivery_method, intended_recipient, max_uses, use_count, expires_at, \
     revoked_at, revoked_by, created_at";

/// PostgreSQL implementation of InviteStore
#[derive(Clone)]
pub struct PgInviteStore {
    pool: PgPool,
}

impl PgInviteStore {
    /// Create a new PgInviteStore
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: InviteId) -> StoreResult<bool> {
        let found: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM property_invites WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(found.is_some())
    }
}

#[async_trait]
impl InviteStore for PgInviteStore {
    #[instrument(skip(self, record), fields(invite_id = %record.id))]
    async fn insert(&self, record: &InviteRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO property_invites (id, property_id, created_by, token_hash, token_salt,
                                          token_lookup, delivery_method, intended_recipient,
                                          max_uses, use_count, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(record.id.into_inner())
        .bind(record.property_id.into_inner())
        .bind(record.created_by.into_inner())
        .bind(&record.token_hash)
        .bind(&record.token_salt)
        .bind(&record.token_lookup)
        .bind(record.delivery_method.as_str())
        .bind(record.intended_recipient.as_deref())
        .bind(record.max_uses)
        .bind(record.use_count)
        .bind(record.expires_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateTokenDigest))?;

        Ok(())
    }

    #[instrument(skip(self, lookup_digest))]
    async fn find_by_lookup(&self, lookup_digest: &str) -> StoreResult<Option<InviteRecord>> {
        let result = sqlx::query_as::<_, InviteRow>(&format!(
            "SELECT {INVITE_COLUMNS} FROM property_invites WHERE token_lookup = $1",
        ))
        .bind(lookup_digest)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(InviteRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: InviteId) -> StoreResult<Option<InviteRecord>> {
        let result = sqlx::query_as::<_, InviteRow>(&format!(
            "SELECT {INVITE_COLUMNS} FROM property_invites WHERE id = $1",
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(InviteRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_property(&self, property_id: PropertyId) -> StoreResult<Vec<InviteRecord>> {
        let results = sqlx::query_as::<_, InviteRow>(&format!(
            "SELECT {INVITE_COLUMNS} FROM property_invites \
             WHERE property_id = $1 ORDER BY created_at DESC",
        ))
        .bind(property_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(InviteRecord::from).collect())
    }

    /// The atomic consume: a single conditional UPDATE whose WHERE clause is
    /// the full precondition, so the check and the increment cannot be
    /// interleaved by a concurrent caller. `expected_use_count` makes the
    /// update a compare-and-swap keyed on the count the caller observed.
    #[instrument(skip(self))]
    async fn try_consume(
        &self,
        id: InviteId,
        expected_use_count: i32,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE property_invites
            SET use_count = use_count + 1
            WHERE id = $1
              AND use_count = $2
              AND use_count < max_uses
              AND revoked_at IS NULL
              AND expires_at > $3
            "#,
        )
        .bind(id.into_inner())
        .bind(expected_use_count)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            if self.exists(id).await? {
                return Err(DomainError::ConsumeConflict);
            }
            return Err(DomainError::InviteNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn release_use(&self, id: InviteId) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE property_invites
            SET use_count = use_count - 1
            WHERE id = $1 AND use_count > 0
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(DomainError::InviteNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn revoke(
        &self,
        id: InviteId,
        revoked_by: UserId,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE property_invites
            SET revoked_at = $2, revoked_by = $3
            WHERE id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .bind(now)
        .bind(revoked_by.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            if self.exists(id).await? {
                return Err(DomainError::AlreadyRevoked);
            }
            return Err(DomainError::InviteNotFound);
        }

        Ok(())
    }
}
