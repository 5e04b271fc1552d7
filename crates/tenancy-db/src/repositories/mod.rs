//! PostgreSQL repository implementations

mod error;
mod invite;
mod linker;
mod property;

pub use invite::PgInviteStore;
pub use linker::PgTenantLinker;
pub use property::PgPropertyDirectory;
