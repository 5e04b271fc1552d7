//! Data transfer objects exchanged with the HTTP surface

mod requests;
mod responses;

pub use requests::CreateInviteRequest;
pub use responses::{
    AcceptStatus, HealthResponse, InviteAcceptedResponse, InviteCreatedResponse,
    InviteSummaryResponse, InviteValidationResponse, PropertyPreviewResponse, ReadinessResponse,
    ValidationStatus,
};
