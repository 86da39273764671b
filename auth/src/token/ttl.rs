use chrono::Duration;

use super::claims::TokenKind;

/// Per-kind token lifetimes.
///
/// Defaults mirror the deployment defaults: short-lived access and
/// single-purpose tokens, a week-long refresh token. All are overridable
/// through service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtls {
    pub access: Duration,
    pub refresh: Duration,
    pub email_confirm: Duration,
    pub password_reset: Duration,
}

impl TokenTtls {
    /// Look up the lifetime configured for a token kind.
    pub fn for_kind(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access,
            TokenKind::Refresh => self.refresh,
            TokenKind::EmailConfirm => self.email_confirm,
            TokenKind::PasswordReset => self.password_reset,
        }
    }
}

impl Default for TokenTtls {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
            email_confirm: Duration::minutes(15),
            password_reset: Duration::minutes(15),
        }
    }
}
