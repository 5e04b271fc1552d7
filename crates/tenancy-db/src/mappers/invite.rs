//! Invite row <-> entity mapper

use tenancy_core::entities::{DeliveryMethod, InviteRecord};
use tenancy_core::value_objects::{InviteId, PropertyId, UserId};
use tenancy_core::traits::PropertyPreview;

use crate::models::{InviteRow, PropertyRow};

/// Convert a stored delivery method string to the enum, tolerating rows
/// written before a method was added
fn parse_delivery_method(raw: &str) -> DeliveryMethod {
    raw.parse().unwrap_or_default()
}

/// Convert the enum to its storage string
#[must_use]
pub fn delivery_method_to_str(method: DeliveryMethod) -> &'static str {
    method.as_str()
}

/// Convert InviteRow to InviteRecord entity
impl From<InviteRow> for InviteRecord {
    fn from(row: InviteRow) -> Self {
        InviteRecord {
            id: InviteId::new(row.id),
            property_id: PropertyId::new(row.property_id),
            created_by: UserId::new(row.created_by),
            token_hash: row.token_hash,
            token_salt: row.token_salt,
            token_lookup: row.token_lookup,
            delivery_method: parse_delivery_method(&row.delivery_method),
            intended_recipient: row.intended_recipient,
            max_uses: row.max_uses,
            use_count: row.use_count,
            expires_at: row.expires_at,
            revoked_at: row.revoked_at,
            revoked_by: row.revoked_by.map(UserId::new),
            created_at: row.created_at,
        }
    }
}

/// Convert PropertyRow to the preview value the coordinator exposes
impl From<PropertyRow> for PropertyPreview {
    fn from(row: PropertyRow) -> Self {
        PropertyPreview {
            id: PropertyId::new(row.id),
            display_name: row.display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_row_to_entity() {
        let now = Utc::now();
        let row = InviteRow {
            id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            token_hash: "hash".to_string(),
            token_salt: "salt".to_string(),
            token_lookup: "lookup".to_string(),
            delivery_method: "email".to_string(),
            intended_recipient: Some("tenant@example.com".to_string()),
            max_uses: 2,
            use_count: 1,
            expires_at: now,
            revoked_at: None,
            revoked_by: None,
            created_at: now,
        };

        let record = InviteRecord::from(row.clone());
        assert_eq!(record.id.into_inner(), row.id);
        assert_eq!(record.delivery_method, DeliveryMethod::Email);
        assert_eq!(record.use_count, 1);
        assert!(!record.is_revoked());
    }

    #[test]
    fn test_unknown_delivery_method_defaults_to_code() {
        assert_eq!(parse_delivery_method("carrier-pigeon"), DeliveryMethod::Code);
    }
}
