use elaview_auth::error::AuthServiceError;
use elaview_auth::usecase::password::verify_password;
use elaview_auth::usecase::signup::{SignupInput, SignupUseCase};

use crate::helpers::{MockCredentialRepo, test_credential};

#[tokio::test]
async fn should_create_credential_and_return_user_id() {
    let repo = MockCredentialRepo::empty();
    let stored = repo.handle();

    let usecase = SignupUseCase { credentials: repo };
    let user_id = usecase
        .execute(SignupInput {
            email: "new@example.com".to_owned(),
            password: "a long enough password".to_owned(),
        })
        .await
        .unwrap();

    let stored = stored.lock().unwrap();
    let credential = stored.iter().find(|c| c.id == user_id).unwrap();
    assert_eq!(credential.email, "new@example.com");
    // Stored as a hash that verifies, never as plain text.
    assert_ne!(credential.password_hash, "a long enough password");
    assert!(verify_password(
        "a long enough password",
        &credential.password_hash
    ));
}

#[tokio::test]
async fn should_reject_invalid_email() {
    let usecase = SignupUseCase {
        credentials: MockCredentialRepo::empty(),
    };
    let result = usecase
        .execute(SignupInput {
            email: "not-an-email".to_owned(),
            password: "a long enough password".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidEmail)),
        "expected InvalidEmail, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_weak_password() {
    let usecase = SignupUseCase {
        credentials: MockCredentialRepo::empty(),
    };
    let result = usecase
        .execute(SignupInput {
            email: "new@example.com".to_owned(),
            password: "short".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::WeakPassword)),
        "expected WeakPassword, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_taken_email() {
    let existing = test_credential();
    let usecase = SignupUseCase {
        credentials: MockCredentialRepo::new(vec![existing.clone()]),
    };
    let result = usecase
        .execute(SignupInput {
            email: existing.email,
            password: "a long enough password".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
}
