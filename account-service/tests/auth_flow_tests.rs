mod common;

use account_service::account::errors::AuthError;
use account_service::account::models::ConfirmationRequestOutcome;
use account_service::account::models::EmailConfirmOutcome;
use account_service::account::models::Principal;
use account_service::account::ports::AuthServicePort;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenKind;
use common::register_command;
use common::MailKind;
use common::TestAuth;
use common::JWT_SECRET;

#[tokio::test]
async fn test_registration_confirmation_login_refresh_flow() {
    let auth = TestAuth::new();

    // Register: account starts unconfirmed, confirmation mail goes out
    let created = auth
        .service
        .register(register_command("alice", "alice@example.com", "password123"))
        .await
        .expect("registration failed");
    assert!(!created.confirmed);
    assert!(created.avatar_url.is_some());

    let sent = auth.mailbox.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "alice@example.com");

    // Login before confirmation is refused
    let result = auth.service.login("alice", "password123").await;
    assert!(matches!(result, Err(AuthError::EmailUnconfirmed)));

    // Request a fresh confirmation token and redeem it
    let outcome = auth
        .service
        .request_email_confirmation("alice@example.com")
        .await
        .unwrap();
    assert_eq!(outcome, ConfirmationRequestOutcome::Accepted);

    let token = auth
        .mailbox
        .last_token(MailKind::Confirmation)
        .await
        .expect("no confirmation mail recorded");
    assert_eq!(
        auth.service.confirm_email(&token).await.unwrap(),
        EmailConfirmOutcome::Confirmed
    );

    // Redeeming again is an idempotent success with a different outcome
    assert_eq!(
        auth.service.confirm_email(&token).await.unwrap(),
        EmailConfirmOutcome::AlreadyConfirmed
    );

    // Login now succeeds with a well-formed pair
    let pair = auth.service.login("alice", "password123").await.unwrap();
    assert_eq!(pair.token_type, "bearer");

    let codec = TokenCodec::new(JWT_SECRET);
    assert_eq!(
        codec
            .parse_typed(&pair.access_token, TokenKind::Access)
            .unwrap(),
        "alice"
    );
    assert_eq!(
        codec
            .parse_typed(&pair.refresh_token, TokenKind::Refresh)
            .unwrap(),
        "alice"
    );

    // The access token resolves back to the principal, sans secrets
    let user = auth
        .service
        .resolve_current_user(&pair.access_token)
        .await
        .unwrap();
    let principal = Principal::from(&user);
    assert_eq!(principal.username, "alice");
    assert_eq!(principal.email, "alice@example.com");

    // Refresh: new access token for the same subject, refresh echoed back
    let refreshed = auth.service.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(refreshed.refresh_token, pair.refresh_token);
    assert_eq!(
        codec
            .parse_typed(&refreshed.access_token, TokenKind::Access)
            .unwrap(),
        "alice"
    );
}

#[tokio::test]
async fn test_password_reset_flow() {
    let auth = TestAuth::new();

    // Unknown address: generic success, nothing dispatched
    auth.service
        .request_password_reset("nonexistent@x.com")
        .await
        .unwrap();
    assert!(auth.mailbox.sent().await.is_empty());

    // Set up a confirmed account
    auth.service
        .register(register_command("alice", "alice@example.com", "old_password"))
        .await
        .unwrap();
    let confirm_token = auth
        .mailbox
        .last_token(MailKind::Confirmation)
        .await
        .unwrap();
    auth.service.confirm_email(&confirm_token).await.unwrap();

    // Real account: reset token dispatched
    auth.service
        .request_password_reset("alice@example.com")
        .await
        .unwrap();
    let reset_token = auth
        .mailbox
        .last_token(MailKind::PasswordReset)
        .await
        .expect("no reset mail recorded");

    auth.service
        .complete_password_reset(&reset_token, "new_password")
        .await
        .unwrap();

    // Old credential no longer verifies against the stored hash, new one does
    let hasher = PasswordHasher::new();
    let stored = auth.store.get("alice@example.com").await.unwrap();
    assert!(!hasher.verify("old_password", &stored.password_hash).unwrap());
    assert!(hasher.verify("new_password", &stored.password_hash).unwrap());

    assert!(matches!(
        auth.service.login("alice", "old_password").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(auth.service.login("alice", "new_password").await.is_ok());
}

#[tokio::test]
async fn test_reset_token_replayable_until_expiry() {
    let auth = TestAuth::new();

    auth.service
        .register(register_command("alice", "alice@example.com", "password123"))
        .await
        .unwrap();
    let confirm_token = auth
        .mailbox
        .last_token(MailKind::Confirmation)
        .await
        .unwrap();
    auth.service.confirm_email(&confirm_token).await.unwrap();

    auth.service
        .request_password_reset("alice@example.com")
        .await
        .unwrap();
    let reset_token = auth
        .mailbox
        .last_token(MailKind::PasswordReset)
        .await
        .unwrap();

    // No server-side consumption tracking: the same token can be redeemed
    // again within its TTL
    auth.service
        .complete_password_reset(&reset_token, "first_password")
        .await
        .unwrap();
    auth.service
        .complete_password_reset(&reset_token, "second_password")
        .await
        .unwrap();

    assert!(auth.service.login("alice", "second_password").await.is_ok());
}

#[tokio::test]
async fn test_confirmation_request_for_confirmed_account_is_noop() {
    let auth = TestAuth::new();

    auth.service
        .register(register_command("alice", "alice@example.com", "password123"))
        .await
        .unwrap();
    let confirm_token = auth
        .mailbox
        .last_token(MailKind::Confirmation)
        .await
        .unwrap();
    auth.service.confirm_email(&confirm_token).await.unwrap();

    let mails_before = auth.mailbox.sent().await.len();
    let outcome = auth
        .service
        .request_email_confirmation("alice@example.com")
        .await
        .unwrap();

    assert_eq!(outcome, ConfirmationRequestOutcome::AlreadyConfirmed);
    assert_eq!(auth.mailbox.sent().await.len(), mails_before);
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let auth = TestAuth::new();

    auth.service
        .register(register_command("alice", "alice@example.com", "password123"))
        .await
        .unwrap();

    assert!(matches!(
        auth.service
            .register(register_command("alice2", "alice@example.com", "password123"))
            .await,
        Err(AuthError::EmailAlreadyExists(_))
    ));
    assert!(matches!(
        auth.service
            .register(register_command("alice", "alice2@example.com", "password123"))
            .await,
        Err(AuthError::UsernameAlreadyExists(_))
    ));
}
