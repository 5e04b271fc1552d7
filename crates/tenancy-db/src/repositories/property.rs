//! PostgreSQL implementation of the PropertyDirectory collaborator

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tenancy_core::traits::{PropertyDirectory, PropertyPreview, StoreResult};
use tenancy_core::value_objects::PropertyId;

use crate::models::PropertyRow;

use super::error::map_db_error;

/// PostgreSQL implementation of PropertyDirectory
#[derive(Clone)]
pub struct PgPropertyDirectory {
    pool: PgPool,
}

impl PgPropertyDirectory {
    /// Create a new PgPropertyDirectory
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyDirectory for PgPropertyDirectory {
    #[instrument(skip(self))]
    async fn preview(&self, property_id: PropertyId) -> StoreResult<Option<PropertyPreview>> {
        let result = sqlx::query_as::<_, PropertyRow>(
            "SELECT id, display_name FROM properties WHERE id = $1",
        )
        .bind(property_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PropertyPreview::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPropertyDirectory>();
    }
}
