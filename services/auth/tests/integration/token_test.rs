use uuid::Uuid;

use elaview_auth::error::AuthServiceError;
use elaview_auth::usecase::token::{
    CreateTokenInput, CreateTokenUseCase, RefreshTokenUseCase, RevokeTokenUseCase,
    issue_access_token, issue_refresh_token, validate_refresh_token,
};

use crate::helpers::{
    MockCredentialRepo, MockProfilePort, MockSessionStore, TEST_JWT_SECRET, TEST_PASSWORD,
    test_credential, test_profile,
};

// ── issue / validate ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_access_token_that_validates_successfully() {
    let user_id = Uuid::new_v4();
    let (token, exp) = issue_access_token(user_id, 1, TEST_JWT_SECRET).unwrap();

    assert!(!token.is_empty());
    assert!(exp > 0);

    let claims = validate_refresh_token(&token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, 1);
    assert_eq!(claims.exp, exp);
    assert!(claims.jti.parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn should_reject_token_signed_with_wrong_secret() {
    let (token, _) = issue_access_token(Uuid::new_v4(), 0, TEST_JWT_SECRET).unwrap();

    let result = validate_refresh_token(&token, "wrong-secret");
    assert!(
        matches!(result, Err(AuthServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_invalid_token_string() {
    let result = validate_refresh_token("not-a-jwt", TEST_JWT_SECRET);
    assert!(
        matches!(result, Err(AuthServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

// ── CreateTokenUseCase (login) ───────────────────────────────────────────────

#[tokio::test]
async fn should_create_token_pair_with_valid_password() {
    let credential = test_credential();

    let usecase = CreateTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        profiles: MockProfilePort::with(test_profile(credential.id, 1)),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let output = usecase
        .execute(CreateTokenInput {
            email: credential.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(output.user_id, credential.id);
    assert_eq!(output.user_role, 1);
    assert!(!output.access_token.is_empty());
    assert!(!output.refresh_token.is_empty());
    assert!(output.access_token_exp > 0);

    // Both tokens must be valid JWTs for this user.
    let access_claims = validate_refresh_token(&output.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(access_claims.sub, credential.id.to_string());

    let refresh_claims = validate_refresh_token(&output.refresh_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(refresh_claims.sub, credential.id.to_string());
}

#[tokio::test]
async fn should_default_to_renter_role_when_profile_not_completed() {
    let credential = test_credential();

    let usecase = CreateTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        profiles: MockProfilePort::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let output = usecase
        .execute(CreateTokenInput {
            email: credential.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(output.user_role, 0);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let credential = test_credential();

    let usecase = CreateTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        profiles: MockProfilePort::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(CreateTokenInput {
            email: credential.email.clone(),
            password: "wrong password entirely".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_email_with_same_error_as_wrong_password() {
    let usecase = CreateTokenUseCase {
        credentials: MockCredentialRepo::empty(),
        profiles: MockProfilePort::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(CreateTokenInput {
            email: "nobody@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_allow_login_for_deactivated_profile() {
    let credential = test_credential();
    let mut profile = test_profile(credential.id, 1);
    profile.is_active = false;

    let usecase = CreateTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        profiles: MockProfilePort::with(profile),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    // Deactivated users still log in so they can reach the reactivate endpoint.
    let output = usecase
        .execute(CreateTokenInput {
            email: credential.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(output.user_role, 1);
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_refresh_token_pair_with_valid_refresh_jwt() {
    let credential = test_credential();
    let refresh = issue_refresh_token(credential.id, 1, TEST_JWT_SECRET).unwrap();

    let usecase = RefreshTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        profiles: MockProfilePort::with(test_profile(credential.id, 1)),
        sessions: MockSessionStore::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let output = usecase.execute(&refresh).await.unwrap();

    assert_eq!(output.user_id, credential.id);
    assert_eq!(output.user_role, 1);
    assert!(!output.access_token.is_empty());
    assert!(!output.refresh_token.is_empty());

    let claims = validate_refresh_token(&output.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, credential.id.to_string());
}

#[tokio::test]
async fn should_pick_up_role_change_on_refresh() {
    let credential = test_credential();
    // Token minted while the user was still a renter.
    let refresh = issue_refresh_token(credential.id, 0, TEST_JWT_SECRET).unwrap();

    let usecase = RefreshTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        profiles: MockProfilePort::with(test_profile(credential.id, 1)),
        sessions: MockSessionStore::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let output = usecase.execute(&refresh).await.unwrap();
    assert_eq!(output.user_role, 1);
}

#[tokio::test]
async fn should_reject_revoked_refresh_token() {
    let credential = test_credential();
    let refresh = issue_refresh_token(credential.id, 0, TEST_JWT_SECRET).unwrap();
    let jti: Uuid = validate_refresh_token(&refresh, TEST_JWT_SECRET)
        .unwrap()
        .jti
        .parse()
        .unwrap();

    let sessions = MockSessionStore::empty();
    sessions.handle().lock().unwrap().insert(jti, 600);

    let usecase = RefreshTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential]),
        profiles: MockProfilePort::empty(),
        sessions,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(&refresh).await;
    assert!(
        matches!(result, Err(AuthServiceError::SessionRevoked)),
        "expected SessionRevoked, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_refresh_when_credential_deleted() {
    let credential = test_credential();
    let refresh = issue_refresh_token(credential.id, 0, TEST_JWT_SECRET).unwrap();

    let usecase = RefreshTokenUseCase {
        credentials: MockCredentialRepo::empty(), // credential no longer exists
        profiles: MockProfilePort::empty(),
        sessions: MockSessionStore::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(&refresh).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_refresh_jwt_signed_with_wrong_secret() {
    let credential = test_credential();
    let refresh = issue_refresh_token(credential.id, 0, "other-secret").unwrap();

    let usecase = RefreshTokenUseCase {
        credentials: MockCredentialRepo::new(vec![credential]),
        profiles: MockProfilePort::empty(),
        sessions: MockSessionStore::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase.execute(&refresh).await;
    assert!(
        matches!(result, Err(AuthServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

// ── RevokeTokenUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_jti_with_ttl_on_revoke() {
    let credential = test_credential();
    let refresh = issue_refresh_token(credential.id, 0, TEST_JWT_SECRET).unwrap();
    let jti: Uuid = validate_refresh_token(&refresh, TEST_JWT_SECRET)
        .unwrap()
        .jti
        .parse()
        .unwrap();

    let sessions = MockSessionStore::empty();
    let revoked = sessions.handle();

    let usecase = RevokeTokenUseCase {
        sessions,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    usecase.execute(&refresh).await.unwrap();

    let revoked = revoked.lock().unwrap();
    let ttl = revoked.get(&jti).copied().expect("jti should be revoked");
    assert!(ttl > 0, "revocation TTL must be positive");
}

#[tokio::test]
async fn should_ignore_unparseable_token_on_revoke() {
    let sessions = MockSessionStore::empty();
    let revoked = sessions.handle();

    let usecase = RevokeTokenUseCase {
        sessions,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    usecase.execute("not-a-jwt").await.unwrap();

    assert!(revoked.lock().unwrap().is_empty());
}
