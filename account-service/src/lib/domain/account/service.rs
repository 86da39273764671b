use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenError;
use auth::TokenKind;
use auth::TokenTtls;
use chrono::Utc;
use tokio::time::timeout;

use crate::account::errors::AuthError;
use crate::account::errors::StoreError;
use crate::account::models::ConfirmationRequestOutcome;
use crate::account::models::EmailConfirmOutcome;
use crate::account::models::RegisterCommand;
use crate::account::models::TokenPair;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::Username;
use crate::account::ports::AuthServicePort;
use crate::account::ports::AvatarResolver;
use crate::account::ports::MailDispatcher;
use crate::account::ports::UserCache;
use crate::account::ports::UserStore;

/// Authentication orchestrator.
///
/// Ties the token codec, credential hasher, user lookup cache, and user store
/// together behind [`AuthServicePort`]. Token issuance and verification are
/// stateless; the injected cache is the only shared mutable state. Store calls
/// are bounded by a timeout and surface as `Unavailable` when it elapses.
pub struct AuthService<S, C, M, A>
where
    S: UserStore,
    C: UserCache,
    M: MailDispatcher,
    A: AvatarResolver,
{
    store: Arc<S>,
    cache: Arc<C>,
    mail: Arc<M>,
    avatars: Arc<A>,
    codec: TokenCodec,
    hasher: PasswordHasher,
    ttls: TokenTtls,
    call_timeout: Duration,
}

impl<S, C, M, A> AuthService<S, C, M, A>
where
    S: UserStore,
    C: UserCache,
    M: MailDispatcher,
    A: AvatarResolver,
{
    /// Create an orchestrator with injected collaborators.
    ///
    /// Secret and TTLs are threaded in explicitly at construction; nothing is
    /// read from ambient global state.
    pub fn new(
        store: Arc<S>,
        cache: Arc<C>,
        mail: Arc<M>,
        avatars: Arc<A>,
        jwt_secret: &[u8],
        ttls: TokenTtls,
        call_timeout: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            mail,
            avatars,
            codec: TokenCodec::new(jwt_secret),
            hasher: PasswordHasher::new(),
            ttls,
            call_timeout,
        }
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>> + Send,
    ) -> Result<T, AuthError> {
        match timeout(self.call_timeout, call).await {
            Ok(result) => result.map_err(|e| AuthError::Unavailable(e.to_string())),
            Err(_) => Err(AuthError::Unavailable(
                "user store call timed out".to_string(),
            )),
        }
    }

    fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, AuthError> {
        self.codec
            .issue(subject, kind, self.ttls.for_kind(kind))
            .map_err(|e| AuthError::Unknown(format!("Token issuance failed: {}", e)))
    }

    /// Read-through lookup: cache hit, or store query with a refill on found.
    ///
    /// Absent users are never cached, so a lookup racing a registration sees
    /// the new account on the next call.
    async fn get_or_load(&self, username: &str) -> Result<Option<User>, AuthError> {
        if let Some(user) = self.cache.get(username).await {
            return Ok(Some(user));
        }

        // A token subject that is not even a well-formed username cannot
        // match any account
        let parsed = match Username::new(username.to_string()) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(None),
        };

        let user = self.bounded(self.store.find_by_username(&parsed)).await?;
        if let Some(ref user) = user {
            self.cache.put(username, user).await;
            tracing::debug!(username, "User cached after store lookup");
        }

        Ok(user)
    }

    async fn dispatch_confirmation(&self, user: &User) -> Result<(), AuthError> {
        let token = self.issue(user.email.as_str(), TokenKind::EmailConfirm)?;

        // Mail delivery is best-effort; a transport failure must not fail the
        // calling operation
        if let Err(e) = self
            .mail
            .send_confirmation(&user.email, &user.username, &token)
            .await
        {
            tracing::error!(
                username = %user.username,
                "Failed to dispatch confirmation email: {}",
                e
            );
        }

        Ok(())
    }
}

#[async_trait]
impl<S, C, M, A> AuthServicePort for AuthService<S, C, M, A>
where
    S: UserStore,
    C: UserCache,
    M: MailDispatcher,
    A: AvatarResolver,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        if self
            .bounded(self.store.find_by_email(command.email.as_str()))
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        if self
            .bounded(self.store.find_by_username(&command.username))
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameAlreadyExists(command.username.to_string()));
        }

        let avatar_url = match self.avatars.resolve(&command.email).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(
                    username = %command.username,
                    "Avatar lookup failed, registering without avatar: {}",
                    e
                );
                None
            }
        };

        let password_hash = self.hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            confirmed: false,
            avatar_url,
            created_at: Utc::now(),
        };

        let created = self.bounded(self.store.create(user)).await?;

        self.dispatch_confirmation(&created).await?;

        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let username =
            Username::new(username.to_string()).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .bounded(self.store.find_by_username(&username))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.confirmed {
            return Err(AuthError::EmailUnconfirmed);
        }

        let access_token = self.issue(user.username.as_str(), TokenKind::Access)?;
        let refresh_token = self.issue(user.username.as_str(), TokenKind::Refresh)?;

        Ok(TokenPair::bearer(access_token, refresh_token))
    }

    async fn resolve_current_user(&self, access_token: &str) -> Result<User, AuthError> {
        let subject = self
            .codec
            .parse_typed(access_token, TokenKind::Access)
            .map_err(|e| {
                tracing::warn!("Access token rejected: {}", e);
                AuthError::Unauthorized
            })?;

        self.get_or_load(&subject)
            .await?
            .ok_or(AuthError::Unauthorized)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let subject = self
            .codec
            .parse_typed(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::warn!("Refresh token rejected: {}", e);
                AuthError::Unauthorized
            })?;

        let user = self
            .get_or_load(&subject)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let access_token = self.issue(user.username.as_str(), TokenKind::Access)?;

        // The refresh token stays valid until its own expiry and is echoed
        // back unchanged
        Ok(TokenPair::bearer(access_token, refresh_token.to_string()))
    }

    async fn request_email_confirmation(
        &self,
        email: &str,
    ) -> Result<ConfirmationRequestOutcome, AuthError> {
        match self.bounded(self.store.find_by_email(email)).await? {
            Some(user) if user.confirmed => Ok(ConfirmationRequestOutcome::AlreadyConfirmed),
            Some(user) => {
                self.dispatch_confirmation(&user).await?;
                Ok(ConfirmationRequestOutcome::Accepted)
            }
            // Unknown addresses get the same outcome as known ones
            None => Ok(ConfirmationRequestOutcome::Accepted),
        }
    }

    async fn confirm_email(&self, token: &str) -> Result<EmailConfirmOutcome, AuthError> {
        let email = self
            .codec
            .parse_typed(token, TokenKind::EmailConfirm)
            .map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .bounded(self.store.find_by_email(&email))
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if user.confirmed {
            return Ok(EmailConfirmOutcome::AlreadyConfirmed);
        }

        self.bounded(self.store.set_confirmed(&email)).await?;
        self.cache.invalidate(user.username.as_str()).await;
        tracing::debug!(username = %user.username, "Email confirmed, cache entry invalidated");

        Ok(EmailConfirmOutcome::Confirmed)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        // Outcome is identical whether or not the account exists
        if let Some(user) = self.bounded(self.store.find_by_email(email)).await? {
            let token = self.issue(user.email.as_str(), TokenKind::PasswordReset)?;

            if let Err(e) = self
                .mail
                .send_password_reset(&user.email, &user.username, &token)
                .await
            {
                tracing::error!(
                    username = %user.username,
                    "Failed to dispatch password reset email: {}",
                    e
                );
            }
        }

        Ok(())
    }

    async fn complete_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let email = self
            .codec
            .parse_typed(token, TokenKind::PasswordReset)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        let password_hash = self.hasher.hash(new_password)?;

        // Unknown subjects are a silent success so completion cannot be used
        // to probe for accounts
        if let Some(user) = self.bounded(self.store.find_by_email(&email)).await? {
            self.bounded(self.store.set_password_hash(&email, &password_hash))
                .await?;
            self.cache.invalidate(user.username.as_str()).await;
            tracing::debug!(username = %user.username, "Password updated, cache entry invalidated");
        }

        Ok(())
    }
}
