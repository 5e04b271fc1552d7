//! Property database model (preview lookup only)

use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the properties table.
///
/// Only the columns the invite subsystem reads; the surrounding application
/// owns the rest of the table.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyRow {
    pub id: Uuid,
    pub display_name: String,
}
