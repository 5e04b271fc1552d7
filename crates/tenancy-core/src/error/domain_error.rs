//! Domain errors - error types for the domain layer
//!
//! Expected lifecycle outcomes (expired, revoked, exhausted, not found)
//! travel as values; only infrastructure failures are genuinely
//! exceptional. Messages never contain plaintext tokens.

use thiserror::Error;

use crate::value_objects::PropertyId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Invite not found")]
    InviteNotFound,

    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Token fails shape check")]
    TokenMalformed,

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Lifecycle Errors
    // =========================================================================
    #[error("Invite has expired")]
    InviteExpired,

    #[error("Invite has been revoked")]
    InviteRevoked,

    #[error("Invite has reached maximum uses")]
    InviteExhausted,

    #[error("Invite is already revoked")]
    AlreadyRevoked,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Token digest already exists")]
    DuplicateTokenDigest,

    #[error("Consume precondition no longer holds")]
    ConsumeConflict,

    #[error("Tenant is already linked to this property")]
    TenantAlreadyLinked,

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    #[error("Tenant linking failed: {0}")]
    LinkingFailed(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InviteNotFound => "UNKNOWN_INVITE",
            Self::PropertyNotFound(_) => "UNKNOWN_PROPERTY",

            Self::TokenMalformed => "TOKEN_MALFORMED",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            Self::InviteExpired => "INVITE_EXPIRED",
            Self::InviteRevoked => "INVITE_REVOKED",
            Self::InviteExhausted => "INVITE_EXHAUSTED",
            Self::AlreadyRevoked => "INVITE_ALREADY_REVOKED",

            Self::DuplicateTokenDigest => "TOKEN_DIGEST_EXISTS",
            Self::ConsumeConflict => "CONSUME_CONFLICT",
            Self::TenantAlreadyLinked => "TENANT_ALREADY_LINKED",

            Self::LinkingFailed(_) => "LINKING_FAILED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InviteNotFound | Self::PropertyNotFound(_))
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::TokenMalformed | Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTokenDigest
                | Self::ConsumeConflict
                | Self::TenantAlreadyLinked
                | Self::AlreadyRevoked
        )
    }

    /// Check if this is an expected lifecycle outcome rather than a failure
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::InviteExpired | Self::InviteRevoked | Self::InviteExhausted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::InviteNotFound.code(), "UNKNOWN_INVITE");
        assert_eq!(DomainError::ConsumeConflict.code(), "CONSUME_CONFLICT");
        assert_eq!(
            DomainError::LinkingFailed("down".to_string()).code(),
            "LINKING_FAILED"
        );
    }

    #[test]
    fn test_classifiers() {
        assert!(DomainError::InviteNotFound.is_not_found());
        assert!(DomainError::TokenMalformed.is_validation());
        assert!(DomainError::DuplicateTokenDigest.is_conflict());
        assert!(DomainError::InviteExpired.is_lifecycle());
        assert!(!DomainError::DatabaseError("x".to_string()).is_conflict());
    }

    #[test]
    fn test_display_never_echoes_secrets() {
        // messages are static or carry opaque ids only
        let err = DomainError::InviteExhausted;
        assert_eq!(err.to_string(), "Invite has reached maximum uses");
    }
}
