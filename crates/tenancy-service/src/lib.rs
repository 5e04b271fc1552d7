//! # tenancy-service
//!
//! Application layer: the invite coordinator orchestrating the token codec,
//! the pure validator, and the store ports, and the DTOs the HTTP surface
//! exchanges with callers. The security policy lives here: plaintext tokens
//! are returned exactly once from creation and never persisted or logged,
//! the read path does uniform work for every candidate, and malformed input
//! is indistinguishable from an unknown token at the public boundary.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AcceptStatus, CreateInviteRequest, HealthResponse, InviteAcceptedResponse,
    InviteCreatedResponse, InviteSummaryResponse, InviteValidationResponse,
    PropertyPreviewResponse, ReadinessResponse, ValidationStatus,
};
pub use services::{
    ContextBuildError, InviteService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
