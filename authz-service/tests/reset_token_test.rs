mod common;

use authz_service::models::Role;
use authz_service::services::ServiceError;
use chrono::Utc;
use common::{test_env, TEST_RESET_KEY};
use platform_core::error::AppError;
use platform_core::utils::signature::sign_payload;

#[tokio::test]
async fn test_round_trip_within_ttl() {
    let env = test_env();
    let identity = env
        .seed_identity("reset@example.com", Role::Vendor, true)
        .await;

    let token = env.state.reset_tokens.issue(&identity).unwrap();

    let (claims, resolved) = env
        .state
        .reset_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap();

    assert_eq!(claims.email, "reset@example.com");
    assert!(claims.expiry_millis > Utc::now().timestamp_millis());
    assert_eq!(resolved.user_id, identity.user_id);
}

#[tokio::test]
async fn test_expired_token_rejected_despite_valid_signature() {
    let env = test_env();
    env.seed_identity("reset@example.com", Role::Vendor, true)
        .await;

    // Correctly signed, already past expiry.
    let expiry = Utc::now().timestamp_millis() - 1_000;
    let signature =
        sign_payload(TEST_RESET_KEY, &format!("reset@example.com:{}", expiry)).unwrap();
    let token = format!("reset@example.com:{}:{}", expiry, signature);

    let err = env
        .state
        .reset_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::TokenExpired));
    assert!(matches!(AppError::from(err), AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_expiry_equality_counts_as_expired() {
    let env = test_env();
    env.seed_identity("reset@example.com", Role::Vendor, true)
        .await;

    let expiry = Utc::now().timestamp_millis();
    let signature =
        sign_payload(TEST_RESET_KEY, &format!("reset@example.com:{}", expiry)).unwrap();
    let token = format!("reset@example.com:{}:{}", expiry, signature);

    let err = env
        .state
        .reset_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::TokenExpired));
}

#[tokio::test]
async fn test_single_character_flips_fail_each_segment() {
    let env = test_env();
    let identity = env
        .seed_identity("reset@example.com", Role::Vendor, true)
        .await;

    let token = env.state.reset_tokens.issue(&identity).unwrap();
    let parts: Vec<&str> = token.split(':').collect();
    let (email, expiry, signature) = (parts[0], parts[1], parts[2]);

    // Email segment: signature no longer matches.
    let bad_email = format!("zeset@example.com:{}:{}", expiry, signature);
    // Expiry segment: push it further out so the check reaches the HMAC.
    let bumped_expiry: i64 = expiry.parse::<i64>().unwrap() + 1;
    let bad_expiry = format!("{}:{}:{}", email, bumped_expiry, signature);
    // Signature segment.
    let flipped = {
        let mut s = signature.to_string();
        let last = s.pop().unwrap();
        s.push(if last == '0' { '1' } else { '0' });
        s
    };
    let bad_signature = format!("{}:{}:{}", email, expiry, flipped);

    for tampered in [bad_email, bad_expiry, bad_signature] {
        let err = env
            .state
            .reset_tokens
            .verify(&tampered, env.state.identities.as_ref())
            .await
            .unwrap_err();
        assert!(
            matches!(err, ServiceError::TokenInvalid),
            "tampered token {:?} produced {:?}",
            tampered,
            err
        );
    }
}

#[tokio::test]
async fn test_wrong_part_count_rejected() {
    let env = test_env();

    for malformed in [
        "",
        "reset@example.com",
        "reset@example.com:1700000000000",
        "reset@example.com:1700000000000:deadbeef:extra",
    ] {
        let err = env
            .state
            .reset_tokens
            .verify(malformed, env.state.identities.as_ref())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TokenInvalid));
    }
}

#[tokio::test]
async fn test_non_numeric_expiry_rejected() {
    let env = test_env();

    let err = env
        .state
        .reset_tokens
        .verify(
            "reset@example.com:soon:deadbeef",
            env.state.identities.as_ref(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::TokenInvalid));
}

#[tokio::test]
async fn test_signed_token_for_unknown_email_rejected() {
    let env = test_env();

    let expiry = Utc::now().timestamp_millis() + 60_000;
    let signature =
        sign_payload(TEST_RESET_KEY, &format!("ghost@example.com:{}", expiry)).unwrap();
    let token = format!("ghost@example.com:{}:{}", expiry, signature);

    let err = env
        .state
        .reset_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::TokenInvalid));
}
