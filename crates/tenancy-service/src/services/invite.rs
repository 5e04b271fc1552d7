//! Invite service - the coordinator for create, validate, accept, revoke
//!
//! Orchestrates the token codec, the pure validator, and the store ports.
//! Security policy enforced here rather than in individual components:
//!
//! - the plaintext token appears exactly once, in the creation response;
//!   it is never persisted and never logged
//! - the read path does the same digest-and-load work for every candidate,
//!   malformed or not, so rejection timing does not reveal how far a
//!   candidate progressed
//! - malformed and unknown tokens are reported identically at the public
//!   boundary; a consume race is reported as exhaustion (the losing caller
//!   holds a token that is, in fact, used up) and logged distinctly

use chrono::Duration;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use tenancy_core::entities::InviteRecord;
use tenancy_core::error::DomainError;
use tenancy_core::token::{self, TokenCandidate};
use tenancy_core::validator::{evaluate, Decision, RejectReason};
use tenancy_core::value_objects::{InviteId, PropertyId, UserId};

use crate::dto::{
    CreateInviteRequest, InviteAcceptedResponse, InviteCreatedResponse, InviteSummaryResponse,
    InviteValidationResponse, PropertyPreviewResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Collapse internal reasons into what callers are allowed to distinguish.
///
/// Malformed folds into not_found so a guessed token and a garbled one look
/// identical; a lost consume race folds into exhausted. Expired, revoked,
/// and exhausted stay distinguishable - they describe a token the caller
/// already holds, not whether a guess exists.
fn public_reason(reason: RejectReason) -> RejectReason {
    match reason {
        RejectReason::Malformed => RejectReason::NotFound,
        RejectReason::Conflict => RejectReason::Exhausted,
        other => other,
    }
}

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    /// Create a new InviteService
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new invite for a property.
    ///
    /// Returns the plaintext token to the caller exactly once; delivering it
    /// is the caller's responsibility and it cannot be re-derived later.
    #[instrument(skip(self, request))]
    pub async fn create_invite(
        &self,
        property_id: PropertyId,
        created_by: UserId,
        request: CreateInviteRequest,
    ) -> ServiceResult<InviteCreatedResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        // Reject creation against properties the application does not know
        self.ctx
            .property_directory()
            .preview(property_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Property", property_id.to_string()))?;

        let policy = self.ctx.invite_config();
        let ttl = Duration::seconds(
            request
                .ttl_seconds
                .unwrap_or(policy.default_ttl_seconds),
        );
        let max_uses = request.max_uses.unwrap_or(policy.default_max_uses);

        // A digest collision on insert is astronomically unlikely but must
        // not be ignored: regenerate and retry within the configured bound.
        let mut attempt = 0;
        loop {
            attempt += 1;

            let plaintext = token::generate_token();
            let normalized = token::normalize(&plaintext);
            let salt = token::generate_salt();
            let hash = token::verification_digest(&normalized, &salt)
                .map_err(|e| ServiceError::internal(e.to_string()))?;
            let lookup = token::lookup_digest(&normalized);

            let now = self.ctx.clock().now();
            let record = InviteRecord::new(
                property_id,
                created_by,
                hash,
                salt,
                lookup,
                now,
                ttl,
            )
            .with_delivery_method(request.delivery_method)
            .with_intended_recipient(request.intended_recipient.clone())
            .with_max_uses(max_uses);

            match self.ctx.invite_store().insert(&record).await {
                Ok(()) => {
                    info!(
                        invite_id = %record.id,
                        property_id = %property_id,
                        created_by = %created_by,
                        max_uses = record.max_uses,
                        expires_at = %record.expires_at,
                        "Invite created"
                    );

                    return Ok(InviteCreatedResponse {
                        token: plaintext,
                        invite: InviteSummaryResponse::from_record(&record, now),
                    });
                }
                Err(DomainError::DuplicateTokenDigest)
                    if attempt < policy.max_insert_attempts =>
                {
                    warn!(attempt, "Token digest collision on insert, regenerating");
                }
                Err(DomainError::DuplicateTokenDigest) => {
                    return Err(ServiceError::internal(
                        "token digest collisions exhausted the retry budget",
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Validate a candidate token without consuming it.
    ///
    /// Read-only and safe to call repeatedly; `use_count` is untouched.
    #[instrument(skip(self, raw_token))]
    pub async fn validate_invite(
        &self,
        raw_token: &str,
    ) -> ServiceResult<InviteValidationResponse> {
        let candidate = TokenCandidate::parse(raw_token);
        let record = self.load_verified(&candidate).await?;
        let now = self.ctx.clock().now();

        match evaluate(&candidate, record.as_ref(), now) {
            Decision::Accept => {
                // record is present whenever the decision is Accept
                let property = match record {
                    Some(ref r) => self
                        .ctx
                        .property_directory()
                        .preview(r.property_id)
                        .await?
                        .map(PropertyPreviewResponse::from),
                    None => None,
                };
                Ok(InviteValidationResponse::valid(property))
            }
            Decision::Reject(reason) => {
                debug!(reason = reason.as_str(), "Invite validation rejected");
                Ok(InviteValidationResponse::rejected(public_reason(reason)))
            }
        }
    }

    /// Accept a candidate token, consuming one use and linking the tenant.
    ///
    /// Re-validates from scratch - a prior validate call proves nothing,
    /// since state may have changed in between. The consume is the store's
    /// atomic compare-and-swap; the linking collaborator runs after it, and
    /// a linking failure is compensated by releasing the consumed use so no
    /// use is left spent without a link.
    #[instrument(skip(self, raw_token))]
    pub async fn accept_invite(
        &self,
        raw_token: &str,
        accepting: UserId,
    ) -> ServiceResult<InviteAcceptedResponse> {
        let candidate = TokenCandidate::parse(raw_token);
        let record = self.load_verified(&candidate).await?;
        let now = self.ctx.clock().now();

        let decision = evaluate(&candidate, record.as_ref(), now);
        let record = match (decision, record) {
            (Decision::Accept, Some(record)) => record,
            (Decision::Accept, None) => {
                return Ok(InviteAcceptedResponse::rejected(RejectReason::NotFound));
            }
            (Decision::Reject(reason), _) => {
                debug!(reason = reason.as_str(), "Invite acceptance rejected");
                return Ok(InviteAcceptedResponse::rejected(public_reason(reason)));
            }
        };

        match self
            .ctx
            .invite_store()
            .try_consume(record.id, record.use_count, now)
            .await
        {
            Ok(()) => {}
            Err(DomainError::ConsumeConflict) => {
                warn!(invite_id = %record.id, "Lost consume race on accept");
                return Ok(InviteAcceptedResponse::rejected(public_reason(
                    RejectReason::Conflict,
                )));
            }
            Err(DomainError::InviteNotFound) => {
                return Ok(InviteAcceptedResponse::rejected(RejectReason::NotFound));
            }
            Err(e) => return Err(e.into()),
        }

        if let Err(e) = self
            .ctx
            .tenant_linker()
            .link_tenant(accepting, record.property_id)
            .await
        {
            warn!(
                invite_id = %record.id,
                property_id = %record.property_id,
                error = %e,
                "Tenant linking failed after consume, releasing use"
            );
            self.release_consumed_use(record.id).await;
            return Ok(InviteAcceptedResponse::rejected(RejectReason::LinkingFailed));
        }

        info!(
            invite_id = %record.id,
            property_id = %record.property_id,
            tenant_id = %accepting,
            "Invite accepted"
        );

        Ok(InviteAcceptedResponse::accepted(record.property_id))
    }

    /// Revoke an invite exactly once
    #[instrument(skip(self))]
    pub async fn revoke_invite(
        &self,
        invite_id: InviteId,
        revoked_by: UserId,
    ) -> ServiceResult<()> {
        let now = self.ctx.clock().now();

        match self
            .ctx
            .invite_store()
            .revoke(invite_id, revoked_by, now)
            .await
        {
            Ok(()) => {
                info!(invite_id = %invite_id, revoked_by = %revoked_by, "Invite revoked");
                Ok(())
            }
            Err(DomainError::InviteNotFound) => {
                Err(ServiceError::not_found("Invite", invite_id.to_string()))
            }
            Err(DomainError::AlreadyRevoked) => {
                Err(ServiceError::conflict("Invite is already revoked"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List all invites issued for a property, newest first
    #[instrument(skip(self))]
    pub async fn list_property_invites(
        &self,
        property_id: PropertyId,
    ) -> ServiceResult<Vec<InviteSummaryResponse>> {
        self.ctx
            .property_directory()
            .preview(property_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Property", property_id.to_string()))?;

        let now = self.ctx.clock().now();
        let invites = self
            .ctx
            .invite_store()
            .find_by_property(property_id)
            .await?;

        Ok(invites
            .iter()
            .map(|record| InviteSummaryResponse::from_record(record, now))
            .collect())
    }

    /// Load the record for a candidate and confirm its salted digest.
    ///
    /// Always computes the lookup digest and hits the store, even for
    /// malformed candidates - the uniform-work half of the timing policy. A
    /// salted-digest mismatch is treated as absence.
    async fn load_verified(
        &self,
        candidate: &TokenCandidate,
    ) -> ServiceResult<Option<InviteRecord>> {
        let record = self
            .ctx
            .invite_store()
            .find_by_lookup(&candidate.lookup_digest())
            .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        let expected = token::verification_digest(candidate.normalized(), &record.token_salt)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if token::digests_match(&expected, &record.token_hash) {
            Ok(Some(record))
        } else {
            debug!(invite_id = %record.id, "Salted digest mismatch on loaded record");
            Ok(None)
        }
    }

    /// Best-effort compensation after a linking failure. A failed release
    /// leaves the record over-counted, which only ever under-admits; it is
    /// logged for operators rather than surfaced to the tenant.
    async fn release_consumed_use(&self, invite_id: InviteId) {
        if let Err(e) = self.ctx.invite_store().release_use(invite_id).await {
            tracing::error!(
                invite_id = %invite_id,
                error = %e,
                "Failed to release consumed use after linking failure"
            );
        }
    }
}
