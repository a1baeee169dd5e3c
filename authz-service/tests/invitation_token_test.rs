mod common;

use authz_service::models::{Identity, Role};
use authz_service::services::ServiceError;
use common::test_env;
use platform_core::error::AppError;

#[tokio::test]
async fn test_round_trip() {
    let env = test_env();
    let identity = env
        .seed_identity("invitee@example.com", Role::Vendor, false)
        .await;

    let token = env.state.invitation_tokens.issue(&identity).unwrap();
    assert!(token.starts_with("invitation:invitee@example.com:"));

    let claims = env
        .state
        .invitation_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap();

    assert_eq!(claims.user_id, identity.user_id);
    assert_eq!(claims.email, identity.email);
    assert_eq!(claims.role, Role::Vendor);
}

#[tokio::test]
async fn test_token_dies_once_invitation_accepted() {
    let env = test_env();
    let identity = env
        .seed_identity("invitee@example.com", Role::Vendor, false)
        .await;

    let token = env.state.invitation_tokens.issue(&identity).unwrap();

    // Valid while pending.
    env.state
        .invitation_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap();

    // Accept, then verify the unchanged bytes again.
    let mut accepted = identity.clone();
    accepted.invitation_accepted = true;
    env.directory.insert_identity(accepted).await;

    let err = env
        .state
        .invitation_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvitationAlreadyAccepted));
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_single_character_flips_fail_each_segment() {
    let env = test_env();
    let identity = env
        .seed_identity("invitee@example.com", Role::Vendor, false)
        .await;

    let token = env.state.invitation_tokens.issue(&identity).unwrap();

    // Claim-type prefix.
    let bad_kind = token.replacen("invitation", "invitatiom", 1);
    // Email segment (resolves to no identity).
    let bad_email = token.replacen("invitee", "invitez", 1);
    // Digest segment.
    let mut bad_digest = token.clone();
    let last = bad_digest.pop().unwrap();
    bad_digest.push(if last == '0' { '1' } else { '0' });

    for tampered in [bad_kind, bad_email, bad_digest] {
        let err = env
            .state
            .invitation_tokens
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
async fn test_malformed_token_rejected() {
    let env = test_env();

    for malformed in ["", "invitation", "invitation:someone@example.com"] {
        let err = env
            .state
            .invitation_tokens
            .verify(malformed, env.state.identities.as_ref())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TokenInvalid));
    }
}

#[tokio::test]
async fn test_role_change_after_issue_invalidates_digest() {
    let env = test_env();
    let identity = env
        .seed_identity("invitee@example.com", Role::Vendor, false)
        .await;

    let token = env.state.invitation_tokens.issue(&identity).unwrap();

    // The digest covers the role snapshot, recomputed from the current
    // identity at verification time.
    let mut promoted = identity.clone();
    promoted.role = Role::Admin;
    env.directory.insert_identity(promoted).await;

    let err = env
        .state
        .invitation_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::TokenInvalid));
}

#[tokio::test]
async fn test_token_for_unknown_identity_rejected() {
    let env = test_env();
    let ghost = Identity::new("ghost@example.com".to_string(), Role::Vendor);

    // Issued for an identity that was never stored (or has been deleted).
    let token = env.state.invitation_tokens.issue(&ghost).unwrap();

    let err = env
        .state
        .invitation_tokens
        .verify(&token, env.state.identities.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::TokenInvalid));
}
