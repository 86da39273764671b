use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use account_service::account::errors::MailError;
use account_service::account::errors::StoreError;
use account_service::account::models::EmailAddress;
use account_service::account::models::RegisterCommand;
use account_service::account::models::User;
use account_service::account::models::Username;
use account_service::account::ports::MailDispatcher;
use account_service::account::ports::UserStore;
use account_service::account::service::AuthService;
use account_service::GravatarResolver;
use account_service::InMemoryUserCache;
use async_trait::async_trait;
use auth::TokenTtls;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

pub const JWT_SECRET: &[u8] = b"integration_secret_32_bytes_long!!";

/// In-memory user store fake, keyed by email.
#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read for assertions, bypassing the auth core.
    pub async fn get(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        self.users
            .write()
            .await
            .insert(user.email.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == *username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn set_confirmed(&self, email: &str) -> Result<(), StoreError> {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.confirmed = true;
        }
        Ok(())
    }

    async fn set_password_hash(&self, email: &str, password_hash: &str) -> Result<(), StoreError> {
        if let Some(user) = self.users.write().await.get_mut(email) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    Confirmation,
    PasswordReset,
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub kind: MailKind,
    pub recipient: String,
    pub token: String,
}

/// Mail dispatcher fake that records every message instead of sending it.
#[derive(Default, Clone)]
pub struct RecordingMailDispatcher {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().await.clone()
    }

    /// Token carried by the most recent message of a kind, if any.
    pub async fn last_token(&self, kind: MailKind) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|mail| mail.kind == kind)
            .map(|mail| mail.token.clone())
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailDispatcher {
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        _username: &Username,
        token: &str,
    ) -> Result<(), MailError> {
        self.sent.lock().await.push(SentMail {
            kind: MailKind::Confirmation,
            recipient: recipient.as_str().to_string(),
            token: token.to_string(),
        });
        Ok(())
    }

    async fn send_password_reset(
        &self,
        recipient: &EmailAddress,
        _username: &Username,
        token: &str,
    ) -> Result<(), MailError> {
        self.sent.lock().await.push(SentMail {
            kind: MailKind::PasswordReset,
            recipient: recipient.as_str().to_string(),
            token: token.to_string(),
        });
        Ok(())
    }
}

/// Fully wired auth core over in-memory fakes.
pub struct TestAuth {
    pub service:
        AuthService<InMemoryUserStore, InMemoryUserCache, RecordingMailDispatcher, GravatarResolver>,
    pub store: InMemoryUserStore,
    pub mailbox: RecordingMailDispatcher,
}

impl TestAuth {
    pub fn new() -> Self {
        let store = InMemoryUserStore::new();
        let mailbox = RecordingMailDispatcher::new();

        let service = AuthService::new(
            Arc::new(store.clone()),
            Arc::new(InMemoryUserCache::new(Duration::from_secs(3600))),
            Arc::new(mailbox.clone()),
            Arc::new(GravatarResolver::new()),
            JWT_SECRET,
            TokenTtls::default(),
            Duration::from_secs(5),
        );

        Self {
            service,
            store,
            mailbox,
        }
    }
}

pub fn register_command(username: &str, email: &str, password: &str) -> RegisterCommand {
    RegisterCommand::new(
        Username::new(username.to_string()).expect("invalid test username"),
        EmailAddress::new(email.to_string()).expect("invalid test email"),
        password.to_string(),
    )
}
