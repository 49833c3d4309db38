use elaview_auth::domain::types::MAX_ACTIVE_RESET_CODES;
use elaview_auth::error::AuthServiceError;
use elaview_auth::usecase::password::{
    RequestPasswordResetInput, RequestPasswordResetUseCase, ResetPasswordInput,
    ResetPasswordUseCase, verify_password,
};

use crate::helpers::{MockCredentialRepo, MockResetCodeRepo, test_credential, test_reset_code};

// ── RequestPasswordResetUseCase ──────────────────────────────────────────────

#[tokio::test]
async fn should_store_code_and_outbox_event_for_known_email() {
    let credential = test_credential();
    let codes = MockResetCodeRepo::empty();
    let codes_handle = codes.codes_handle();
    let events_handle = codes.events_handle();

    let usecase = RequestPasswordResetUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        reset_codes: codes,
    };
    usecase
        .execute(RequestPasswordResetInput {
            email: credential.email.clone(),
        })
        .await
        .unwrap();

    let codes = codes_handle.lock().unwrap();
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].credential_id, credential.id);
    assert_eq!(codes[0].code.len(), 12);
    assert!(codes[0].is_valid());

    // The email payload travels via the outbox, atomically with the code.
    let events = events_handle.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "password_reset_requested");
    assert_eq!(events[0].payload["email"], credential.email);
    assert_eq!(events[0].payload["code"], codes[0].code);
}

#[tokio::test]
async fn should_succeed_silently_for_unknown_email() {
    let codes = MockResetCodeRepo::empty();
    let codes_handle = codes.codes_handle();

    let usecase = RequestPasswordResetUseCase {
        credentials: MockCredentialRepo::empty(),
        reset_codes: codes,
    };
    // No account enumeration: unknown email is indistinguishable from success.
    usecase
        .execute(RequestPasswordResetInput {
            email: "nobody@example.com".to_owned(),
        })
        .await
        .unwrap();

    assert!(codes_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_when_active_code_cap_reached() {
    let credential = test_credential();
    let existing = (0..MAX_ACTIVE_RESET_CODES)
        .map(|_| test_reset_code(credential.id))
        .collect();

    let usecase = RequestPasswordResetUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        reset_codes: MockResetCodeRepo::new(existing),
    };
    let result = usecase
        .execute(RequestPasswordResetInput {
            email: credential.email,
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::TooManyResetCodes)),
        "expected TooManyResetCodes, got {result:?}"
    );
}

// ── ResetPasswordUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_and_mark_code_used() {
    let credential = test_credential();
    let code = test_reset_code(credential.id);
    let code_str = code.code.clone();
    let code_id = code.id;

    let credentials = MockCredentialRepo::new(vec![credential.clone()]);
    let credentials_handle = credentials.handle();
    let codes = MockResetCodeRepo::new(vec![code]);
    let codes_handle = codes.codes_handle();

    let usecase = ResetPasswordUseCase {
        credentials,
        reset_codes: codes,
    };
    usecase
        .execute(ResetPasswordInput {
            email: credential.email.clone(),
            code: code_str,
            new_password: "brand new password".to_owned(),
        })
        .await
        .unwrap();

    let codes = codes_handle.lock().unwrap();
    assert!(
        codes.iter().find(|c| c.id == code_id).unwrap().used_at.is_some(),
        "reset code should be single-use"
    );

    let credentials = credentials_handle.lock().unwrap();
    let updated = credentials.iter().find(|c| c.id == credential.id).unwrap();
    assert!(verify_password("brand new password", &updated.password_hash));
}

#[tokio::test]
async fn should_reject_unknown_code() {
    let credential = test_credential();

    let usecase = ResetPasswordUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        reset_codes: MockResetCodeRepo::empty(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            email: credential.email,
            code: "WRONGCODE999".to_owned(),
            new_password: "brand new password".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidResetCode)),
        "expected InvalidResetCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_email_with_same_error_as_unknown_code() {
    let usecase = ResetPasswordUseCase {
        credentials: MockCredentialRepo::empty(),
        reset_codes: MockResetCodeRepo::empty(),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            email: "nobody@example.com".to_owned(),
            code: "ABCDEF123456".to_owned(),
            new_password: "brand new password".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidResetCode)),
        "expected InvalidResetCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_weak_replacement_password() {
    let credential = test_credential();
    let code = test_reset_code(credential.id);
    let code_str = code.code.clone();

    let usecase = ResetPasswordUseCase {
        credentials: MockCredentialRepo::new(vec![credential.clone()]),
        reset_codes: MockResetCodeRepo::new(vec![code]),
    };
    let result = usecase
        .execute(ResetPasswordInput {
            email: credential.email,
            code: code_str,
            new_password: "short".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::WeakPassword)),
        "expected WeakPassword, got {result:?}"
    );
}
