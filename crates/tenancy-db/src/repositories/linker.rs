//! PostgreSQL implementation of the TenantLinker collaborator
//!
//! Reference implementation; a host application may supply its own linker
//! (e.g. one that also provisions onboarding state) as long as it honours
//! the port contract.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tenancy_core::error::DomainError;
use tenancy_core::traits::{StoreResult, TenantLinker};
use tenancy_core::value_objects::{PropertyId, UserId};

use super::error::map_unique_violation;

/// PostgreSQL implementation of TenantLinker
#[derive(Clone)]
pub struct PgTenantLinker {
    pool: PgPool,
}

impl PgTenantLinker {
    /// Create a new PgTenantLinker
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantLinker for PgTenantLinker {
    #[instrument(skip(self))]
    async fn link_tenant(&self, tenant: UserId, property: PropertyId) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO property_tenants (property_id, tenant_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(property.into_inner())
        .bind(tenant.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TenantAlreadyLinked))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linker_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTenantLinker>();
    }
}
