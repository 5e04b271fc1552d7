//! Ports - interfaces the infrastructure layer implements

mod store;

pub use store::{
    Clock, InviteStore, PropertyDirectory, PropertyPreview, StoreResult, SystemClock, TenantLinker,
};
