//! # tenancy-db
//!
//! Database layer implementing the invite store and reference collaborators
//! with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Row ↔ entity mappers
//! - `PgInviteStore`: the atomic conditional consume at the heart of the
//!   subsystem, plus insert/load/revoke
//! - `PgTenantLinker` / `PgPropertyDirectory`: reference implementations of
//!   the collaborator ports
//!
//! The schema lives in the workspace `migrations/` directory.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgInviteStore, PgPropertyDirectory, PgTenantLinker};
