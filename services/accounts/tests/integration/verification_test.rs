use chrono::{Duration, Utc};

use gatehouse_accounts::error::AccountsServiceError;
use gatehouse_accounts::usecase::verification::{
    SendCodeInput, SendCodeUseCase, VerifyCodeInput, VerifyCodeUseCase,
};

use crate::helpers::{MockChannel, MockCodeRepo, test_code};

const IDENTITY: &str = "user@example.com";

fn send_input() -> SendCodeInput {
    SendCodeInput {
        identity: IDENTITY.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_code_and_persist_row() {
    let repo = MockCodeRepo::empty();
    let rows = repo.rows_handle();
    let channel = MockChannel::working();
    let sent = channel.sent_handle();

    let uc = SendCodeUseCase {
        codes: repo,
        channel,
    };
    uc.execute(send_input()).await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1, "expected exactly one outbound message");
    assert_eq!(sent[0].0, IDENTITY);

    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.code.len(), 6);
    assert!(row.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(row.attempts, 1, "first issuance starts the counter at 1");
    assert_eq!(row.code, sent[0].1, "persisted code must match what went out");
}

#[tokio::test]
async fn should_reject_second_send_within_cooldown() {
    let mut existing = test_code(IDENTITY);
    existing.last_attempt_at = Utc::now() - Duration::seconds(30);

    let repo = MockCodeRepo::new(vec![existing.clone()]);
    let rows = repo.rows_handle();
    let uc = SendCodeUseCase {
        codes: repo,
        channel: MockChannel::working(),
    };

    let result = uc.execute(send_input()).await;
    assert!(
        matches!(result, Err(AccountsServiceError::CooldownActive)),
        "expected CooldownActive, got {result:?}"
    );

    // The stored code is untouched.
    assert_eq!(rows.lock().unwrap()[0].code, existing.code);
}

#[tokio::test]
async fn should_reject_sixth_send_within_window() {
    let mut existing = test_code(IDENTITY);
    existing.attempts = 5;
    existing.created_at = Utc::now() - Duration::hours(1);
    existing.last_attempt_at = Utc::now() - Duration::minutes(2);

    let uc = SendCodeUseCase {
        codes: MockCodeRepo::new(vec![existing]),
        channel: MockChannel::working(),
    };

    let result = uc.execute(send_input()).await;
    assert!(
        matches!(result, Err(AccountsServiceError::SendLimitReached)),
        "expected SendLimitReached, got {result:?}"
    );
}

#[tokio::test]
async fn should_restart_counter_after_window_elapsed() {
    let mut existing = test_code(IDENTITY);
    existing.attempts = 5;
    existing.created_at = Utc::now() - Duration::hours(25);
    existing.last_attempt_at = Utc::now() - Duration::hours(25);

    let repo = MockCodeRepo::new(vec![existing]);
    let rows = repo.rows_handle();
    let uc = SendCodeUseCase {
        codes: repo,
        channel: MockChannel::working(),
    };

    uc.execute(send_input()).await.unwrap();

    assert_eq!(rows.lock().unwrap()[0].attempts, 1);
}

#[tokio::test]
async fn should_increment_attempts_on_reissue() {
    let mut existing = test_code(IDENTITY);
    existing.attempts = 2;
    existing.created_at = Utc::now() - Duration::minutes(10);
    existing.last_attempt_at = Utc::now() - Duration::minutes(2);

    let repo = MockCodeRepo::new(vec![existing.clone()]);
    let rows = repo.rows_handle();
    let uc = SendCodeUseCase {
        codes: repo,
        channel: MockChannel::working(),
    };

    uc.execute(send_input()).await.unwrap();

    let rows = rows.lock().unwrap();
    assert_eq!(rows.len(), 1, "reissue overwrites the single row");
    assert_eq!(rows[0].attempts, 3);
    assert_ne!(rows[0].code, existing.code, "reissue generates a fresh code");
}

#[tokio::test]
async fn should_not_persist_code_when_delivery_fails() {
    let repo = MockCodeRepo::empty();
    let rows = repo.rows_handle();
    let uc = SendCodeUseCase {
        codes: repo,
        channel: MockChannel::failing(),
    };

    let result = uc.execute(send_input()).await;
    assert!(
        matches!(result, Err(AccountsServiceError::DeliveryFailed)),
        "expected DeliveryFailed, got {result:?}"
    );
    assert!(rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_invalid_identity_without_sending() {
    let channel = MockChannel::rejecting();
    let sent = channel.sent_handle();
    let uc = SendCodeUseCase {
        codes: MockCodeRepo::empty(),
        channel,
    };

    let result = uc.execute(send_input()).await;
    assert!(
        matches!(result, Err(AccountsServiceError::InvalidIdentity)),
        "expected InvalidIdentity, got {result:?}"
    );
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_verify_and_consume_code() {
    let repo = MockCodeRepo::new(vec![test_code(IDENTITY)]);
    let rows = repo.rows_handle();
    let uc = VerifyCodeUseCase { codes: repo };

    uc.execute(VerifyCodeInput {
        identity: IDENTITY.to_owned(),
        code: "123456".to_owned(),
    })
    .await
    .unwrap();

    assert!(
        rows.lock().unwrap().is_empty(),
        "successful verification deletes the row"
    );
}

#[tokio::test]
async fn should_reject_repeat_verification_after_success() {
    let uc = VerifyCodeUseCase {
        codes: MockCodeRepo::new(vec![test_code(IDENTITY)]),
    };

    let input = || VerifyCodeInput {
        identity: IDENTITY.to_owned(),
        code: "123456".to_owned(),
    };
    uc.execute(input()).await.unwrap();

    let result = uc.execute(input()).await;
    assert!(
        matches!(result, Err(AccountsServiceError::CodeNotFound)),
        "expected CodeNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_code() {
    let mut existing = test_code(IDENTITY);
    existing.created_at = Utc::now() - Duration::minutes(16);

    let repo = MockCodeRepo::new(vec![existing]);
    let rows = repo.rows_handle();
    let uc = VerifyCodeUseCase { codes: repo };

    let result = uc
        .execute(VerifyCodeInput {
            identity: IDENTITY.to_owned(),
            code: "123456".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(AccountsServiceError::CodeExpired)),
        "expected CodeExpired, got {result:?}"
    );
    assert_eq!(rows.lock().unwrap().len(), 1, "expired row is not consumed");
}

#[tokio::test]
async fn should_reject_mismatched_code() {
    let repo = MockCodeRepo::new(vec![test_code(IDENTITY)]);
    let rows = repo.rows_handle();
    let uc = VerifyCodeUseCase { codes: repo };

    let result = uc
        .execute(VerifyCodeInput {
            identity: IDENTITY.to_owned(),
            code: "654321".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(AccountsServiceError::CodeMismatch)),
        "expected CodeMismatch, got {result:?}"
    );
    assert_eq!(rows.lock().unwrap().len(), 1, "mismatch keeps the row");
}

#[tokio::test]
async fn should_reject_verification_for_unknown_identity() {
    let uc = VerifyCodeUseCase {
        codes: MockCodeRepo::empty(),
    };

    let result = uc
        .execute(VerifyCodeInput {
            identity: "nobody@example.com".to_owned(),
            code: "123456".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AccountsServiceError::CodeNotFound)));
}
