//! # tenancy-api
//!
//! REST surface for the invitation token subsystem. Three tenant/landlord
//! operations (create, validate, accept) plus revocation and a landlord
//! listing, each a single entry point so deployment-level rate limiting can
//! be layered in front without touching the handlers.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
