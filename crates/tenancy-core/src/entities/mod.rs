//! Domain entities - core business objects

mod invite;

pub use invite::{DeliveryMethod, InviteRecord, InviteStatus, ParseDeliveryMethodError};
