//! API integration tests
//!
//! These tests require a running PostgreSQL instance with the workspace
//! migrations applied and the DATABASE_URL environment variable set; they
//! skip silently otherwise.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env,
    fixtures::{seed_property, AcceptBody, CreatedInviteBody, TestIdentity, ValidationBody},
    TestServer,
};
use reqwest::StatusCode;
use tenancy_core::token::generate_token;

async fn create_invite(server: &TestServer, landlord: &TestIdentity) -> CreatedInviteBody {
    let property_id = seed_property(&server.pool, "2 Alder Court")
        .await
        .expect("seed property");

    let response = server
        .post_auth(
            &format!("/api/v1/properties/{property_id}/invites"),
            &serde_json::json!({}),
            &landlord.token,
        )
        .await
        .expect("request failed");

    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Invite lifecycle
// ============================================================================

#[tokio::test]
async fn test_full_invite_scenario() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let landlord = TestIdentity::new();
    let tenant = TestIdentity::new();

    // Create
    let created = create_invite(&server, &landlord).await;
    assert_eq!(created.token.len(), 12);
    assert_eq!(created.invite.status, "active");
    assert_eq!(created.invite.max_uses, 1);

    // Validate (no auth) shows the property preview
    let response = server
        .get(&format!("/api/v1/invites/validate?t={}", created.token))
        .await
        .unwrap();
    let validated: ValidationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(validated.status, "valid");
    assert_eq!(
        validated.property.as_ref().map(|p| p.display_name.as_str()),
        Some("2 Alder Court")
    );

    // Accept links the tenant
    let response = server
        .post_empty_auth(
            &format!("/api/v1/invites/accept?t={}", created.token),
            &tenant.token,
        )
        .await
        .unwrap();
    let accepted: AcceptBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "accepted");
    assert_eq!(
        accepted.linked_property_id.as_deref(),
        Some(created.invite.property_id.as_str())
    );

    // The link row exists
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM property_tenants WHERE tenant_id = $1",
    )
    .bind(tenant.user_id.into_inner())
    .fetch_one(&server.pool)
    .await
    .unwrap();
    assert_eq!(count, 1);

    // The allowance is now spent
    let response = server
        .get(&format!("/api/v1/invites/validate?t={}", created.token))
        .await
        .unwrap();
    let validated: ValidationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(validated.status, "invalid");
    assert_eq!(validated.reason.as_deref(), Some("exhausted"));
}

#[tokio::test]
async fn test_create_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let property_id = seed_property(&server.pool, "9 Birch Lane").await.unwrap();

    let response = server
        .post_empty(&format!("/api/v1/properties/{property_id}/invites"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_accept_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let landlord = TestIdentity::new();
    let created = create_invite(&server, &landlord).await;

    let response = server
        .post_empty(&format!("/api/v1/invites/accept?t={}", created.token))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_revoke_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let landlord = TestIdentity::new();
    let created = create_invite(&server, &landlord).await;

    let response = server
        .delete_auth(&format!("/api/v1/invites/{}", created.invite.id), &landlord.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // A revoked token reports revoked, not unknown
    let response = server
        .get(&format!("/api/v1/invites/validate?t={}", created.token))
        .await
        .unwrap();
    let validated: ValidationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(validated.status, "invalid");
    assert_eq!(validated.reason.as_deref(), Some("revoked"));

    // Second revoke conflicts
    let response = server
        .delete_auth(&format!("/api/v1/invites/{}", created.invite.id), &landlord.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_listing_shows_issued_invites() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let landlord = TestIdentity::new();
    let property_id = seed_property(&server.pool, "Flat 3, The Maltings")
        .await
        .unwrap();

    for _ in 0..2 {
        let response = server
            .post_auth(
                &format!("/api/v1/properties/{property_id}/invites"),
                &serde_json::json!({}),
                &landlord.token,
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth(
            &format!("/api/v1/properties/{property_id}/invites"),
            &landlord.token,
        )
        .await
        .unwrap();
    let invites: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(invites.len(), 2);
    // summaries never leak digest material
    for invite in &invites {
        let body = invite.to_string();
        assert!(!body.contains("token_hash"));
        assert!(!body.contains("token_salt"));
        assert!(!body.contains("token_lookup"));
    }
}

// ============================================================================
// Enumeration and tampering
// ============================================================================

#[tokio::test]
async fn test_never_issued_tokens_are_uniformly_unknown() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    for _ in 0..10 {
        let guess = generate_token();
        let response = server
            .get(&format!("/api/v1/invites/validate?t={guess}"))
            .await
            .unwrap();
        let validated: ValidationBody = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(validated.status, "invalid");
        assert_eq!(validated.reason.as_deref(), Some("not_found"));
        assert!(validated.property.is_none());
    }
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let landlord = TestIdentity::new();
    let created = create_invite(&server, &landlord).await;

    let mut chars: Vec<char> = created.token.chars().collect();
    chars[0] = if chars[0] == 'x' { 'y' } else { 'x' };
    let tampered: String = chars.into_iter().collect();

    let response = server
        .get(&format!("/api/v1/invites/validate?t={tampered}"))
        .await
        .unwrap();
    let validated: ValidationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(validated.status, "invalid");
    assert_eq!(validated.reason.as_deref(), Some("not_found"));
}

#[tokio::test]
async fn test_garbled_token_indistinguishable_from_unknown() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/invites/validate?t=%21%21garbage%21%21")
        .await
        .unwrap();
    let validated: ValidationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(validated.status, "invalid");
    assert_eq!(validated.reason.as_deref(), Some("not_found"));
}

#[tokio::test]
async fn test_invalid_property_id_is_bad_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let landlord = TestIdentity::new();

    let response = server
        .post_auth(
            "/api/v1/properties/not-a-uuid/invites",
            &serde_json::json!({}),
            &landlord.token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
