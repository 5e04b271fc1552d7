//! Integration test support library
//!
//! Provides the in-process test server, fixtures, and assertion helpers
//! used by the API scenario tests.

pub mod fixtures;
pub mod helpers;

pub use helpers::TestServer;

use anyhow::Result;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

/// Check whether the environment is set up for integration tests.
///
/// Tests are skipped (not failed) when DATABASE_URL is absent or the
/// database is unreachable, matching how the repository-level tests gate.
pub async fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();

    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    };

    if sqlx::postgres::PgPool::connect(&url).await.is_err() {
        eprintln!("Skipping test: database unreachable");
        return false;
    }

    true
}

/// Assert a response status, printing the body on mismatch
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("expected {expected}, got {status}: {body}");
    }
    Ok(())
}

/// Assert a response status and deserialize the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected {
        anyhow::bail!("expected {expected}, got {status}: {body}");
    }
    Ok(serde_json::from_str(&body)?)
}
