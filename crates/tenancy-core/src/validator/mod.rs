//! Invite validator - the pure accept/reject decision
//!
//! No I/O and no clock access: the caller loads the record and supplies
//! `now`, which is what makes the boundary conditions testable to the
//! second.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::InviteRecord;
use crate::token::TokenCandidate;

/// Why a candidate token was rejected.
///
/// `Conflict` and `LinkingFailed` are never produced by [`evaluate`]; they
/// arise during acceptance and are included here so the taxonomy is closed
/// in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Malformed,
    NotFound,
    Expired,
    Revoked,
    Exhausted,
    Conflict,
    LinkingFailed,
}

impl RejectReason {
    /// Stable wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::Exhausted => "exhausted",
            Self::Conflict => "conflict",
            Self::LinkingFailed => "linking_failed",
        }
    }
}

/// Outcome of evaluating a candidate against a loaded record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(RejectReason),
}

impl Decision {
    /// Check if this decision accepts the candidate
    #[must_use]
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Evaluate a candidate token against the record loaded for it.
///
/// First match wins, in this order: malformed, not found, revoked, expired,
/// exhausted. Revocation and expiry are checked before exhaustion on
/// purpose: an administrator's explicit revoke or natural expiry is clearer
/// feedback than "someone else already used it".
#[must_use]
pub fn evaluate(
    candidate: &TokenCandidate,
    record: Option<&InviteRecord>,
    now: DateTime<Utc>,
) -> Decision {
    if !candidate.is_well_formed() {
        return Decision::Reject(RejectReason::Malformed);
    }

    let Some(record) = record else {
        return Decision::Reject(RejectReason::NotFound);
    };

    if record.is_revoked() {
        Decision::Reject(RejectReason::Revoked)
    } else if record.is_expired(now) {
        Decision::Reject(RejectReason::Expired)
    } else if record.is_exhausted() {
        Decision::Reject(RejectReason::Exhausted)
    } else {
        Decision::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InviteRecord;
    use crate::token::generate_token;
    use crate::value_objects::{PropertyId, UserId};
    use chrono::Duration;

    fn candidate() -> TokenCandidate {
        TokenCandidate::parse(&generate_token())
    }

    fn record(now: DateTime<Utc>) -> InviteRecord {
        InviteRecord::new(
            PropertyId::generate(),
            UserId::generate(),
            "hash".to_string(),
            "salt".to_string(),
            "lookup".to_string(),
            now,
            Duration::days(7),
        )
    }

    #[test]
    fn test_accepts_fresh_record() {
        let now = Utc::now();
        let decision = evaluate(&candidate(), Some(&record(now)), now);
        assert!(decision.is_accept());
    }

    #[test]
    fn test_malformed_rejected_before_lookup_result_matters() {
        let now = Utc::now();
        let bad = TokenCandidate::parse("!!!");

        // even with a perfectly valid record present, shape wins
        assert_eq!(
            evaluate(&bad, Some(&record(now)), now),
            Decision::Reject(RejectReason::Malformed)
        );
        assert_eq!(
            evaluate(&bad, None, now),
            Decision::Reject(RejectReason::Malformed)
        );
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let now = Utc::now();
        assert_eq!(
            evaluate(&candidate(), None, now),
            Decision::Reject(RejectReason::NotFound)
        );
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let invite = record(now);

        let before = invite.expires_at - Duration::seconds(1);
        let after = invite.expires_at + Duration::seconds(1);

        assert!(evaluate(&candidate(), Some(&invite), before).is_accept());
        assert_eq!(
            evaluate(&candidate(), Some(&invite), after),
            Decision::Reject(RejectReason::Expired)
        );
    }

    #[test]
    fn test_exhausted_record_rejected() {
        let now = Utc::now();
        let mut invite = record(now);
        invite.use_count = invite.max_uses;

        assert_eq!(
            evaluate(&candidate(), Some(&invite), now),
            Decision::Reject(RejectReason::Exhausted)
        );
    }

    #[test]
    fn test_revoked_reported_over_expired_and_exhausted() {
        let now = Utc::now();
        let mut invite = record(now);
        invite.use_count = invite.max_uses;
        invite.revoked_at = Some(now);

        let after_expiry = invite.expires_at + Duration::seconds(1);
        assert_eq!(
            evaluate(&candidate(), Some(&invite), after_expiry),
            Decision::Reject(RejectReason::Revoked)
        );
    }

    #[test]
    fn test_expired_reported_over_exhausted() {
        let now = Utc::now();
        let mut invite = record(now);
        invite.use_count = invite.max_uses;

        let after_expiry = invite.expires_at + Duration::seconds(1);
        assert_eq!(
            evaluate(&candidate(), Some(&invite), after_expiry),
            Decision::Reject(RejectReason::Expired)
        );
    }

    #[test]
    fn test_reason_wire_names() {
        assert_eq!(RejectReason::NotFound.as_str(), "not_found");
        assert_eq!(RejectReason::LinkingFailed.as_str(), "linking_failed");
        assert_eq!(
            serde_json::to_string(&RejectReason::Exhausted).unwrap(),
            "\"exhausted\""
        );
    }
}
