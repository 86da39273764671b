use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::errors::AvatarError;
use crate::account::errors::MailError;
use crate::account::errors::StoreError;
use crate::account::models::ConfirmationRequestOutcome;
use crate::account::models::EmailAddress;
use crate::account::models::EmailConfirmOutcome;
use crate::account::models::RegisterCommand;
use crate::account::models::TokenPair;
use crate::account::models::User;
use crate::account::models::Username;

/// Port for the authentication orchestrator.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and dispatch its confirmation email.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Duplicate identity
    /// * `Unavailable` - Store call failed or timed out
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or password mismatch
    /// * `EmailUnconfirmed` - Credentials valid but email not confirmed
    /// * `Unavailable` - Store call failed or timed out
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Resolve the caller behind a bearer access token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, wrong kind, or no such user
    /// * `Unavailable` - Store call failed or timed out
    async fn resolve_current_user(&self, access_token: &str) -> Result<User, AuthError>;

    /// Exchange a refresh token for a fresh access token.
    ///
    /// The refresh token itself is echoed back unchanged.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, wrong kind, or no such user
    /// * `Unavailable` - Store call failed or timed out
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Issue and dispatch an email-confirmation token.
    ///
    /// No-ops for already-confirmed accounts. Unknown addresses get the same
    /// `Accepted` outcome as known ones.
    ///
    /// # Errors
    /// * `Unavailable` - Store call failed or timed out
    async fn request_email_confirmation(
        &self,
        email: &str,
    ) -> Result<ConfirmationRequestOutcome, AuthError>;

    /// Redeem an email-confirmation token.
    ///
    /// Idempotent: an already-confirmed account is a success without mutation.
    ///
    /// # Errors
    /// * `InvalidToken` - Token fails validation or subject is unknown
    /// * `Unavailable` - Store call failed or timed out
    async fn confirm_email(&self, token: &str) -> Result<EmailConfirmOutcome, AuthError>;

    /// Issue and dispatch a password-reset token.
    ///
    /// Succeeds identically whether or not the account exists, so the response
    /// never leaks account existence.
    ///
    /// # Errors
    /// * `Unavailable` - Store call failed or timed out
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Redeem a password-reset token and store the new password hash.
    ///
    /// # Errors
    /// * `TokenExpired` - Reset token lapsed (surfaced distinctly)
    /// * `InvalidToken` - Any other token failure
    /// * `Unavailable` - Store call failed or timed out
    async fn complete_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;
}

/// Persistence operations the auth core consumes from the user store.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Retrieve a user by username (None if not found).
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError>;

    /// Retrieve a user by email address (None if not found).
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Mark the account with this email as confirmed.
    ///
    /// Silently no-ops if no such account exists.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn set_confirmed(&self, email: &str) -> Result<(), StoreError>;

    /// Replace the password hash for the account with this email.
    ///
    /// Silently no-ops if no such account exists, so reset completion cannot
    /// be used to probe for accounts.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn set_password_hash(&self, email: &str, password_hash: &str) -> Result<(), StoreError>;
}

/// Read-side cache for username lookups.
///
/// Implementations are infallible from the orchestrator's point of view: a
/// backend problem must degrade to a miss, never surface as an error.
#[async_trait]
pub trait UserCache: Send + Sync + 'static {
    /// Return the cached snapshot for a username, if present and fresh.
    async fn get(&self, username: &str) -> Option<User>;

    /// Store a snapshot with a fresh TTL.
    async fn put(&self, username: &str, user: &User);

    /// Drop any cached entry for a username.
    async fn invalidate(&self, username: &str);
}

/// Outbound mail dispatch for confirmation and reset tokens.
///
/// The auth core hands over the token and recipient; rendering and delivery
/// are the dispatcher's concern.
#[async_trait]
pub trait MailDispatcher: Send + Sync + 'static {
    /// Send an email-confirmation message carrying the token.
    ///
    /// # Errors
    /// * `DispatchFailed` - Message could not be handed to the transport
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        username: &Username,
        token: &str,
    ) -> Result<(), MailError>;

    /// Send a password-reset message carrying the token.
    ///
    /// # Errors
    /// * `DispatchFailed` - Message could not be handed to the transport
    async fn send_password_reset(
        &self,
        recipient: &EmailAddress,
        username: &Username,
        token: &str,
    ) -> Result<(), MailError>;
}

/// Best-effort avatar lookup for new registrations.
///
/// A failure means "no avatar"; the orchestrator never propagates it.
#[async_trait]
pub trait AvatarResolver: Send + Sync + 'static {
    /// Resolve an avatar URL for an email address.
    ///
    /// # Errors
    /// * `Unavailable` - Provider could not be consulted
    async fn resolve(&self, email: &EmailAddress) -> Result<String, AvatarError>;
}
