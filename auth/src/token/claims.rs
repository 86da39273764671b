use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Discriminator restricting a token to one operation family.
///
/// A token of one kind must never be accepted where another kind is expected;
/// every validation site matches on this enum exhaustively. Wire values are
/// the `token_type` strings carried inside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "access")]
    Access,
    #[serde(rename = "refresh")]
    Refresh,
    #[serde(rename = "email")]
    EmailConfirm,
    #[serde(rename = "reset")]
    PasswordReset,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::EmailConfirm => "email",
            TokenKind::PasswordReset => "reset",
        };
        label.fmt(f)
    }
}

/// Payload of a signed token.
///
/// Self-contained assertion: subject, kind, issuance and expiry instants.
/// Tokens are never persisted server-side and are revocable only by expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the identity string (username or email, depending on kind)
    pub sub: String,

    /// Token kind discriminator
    pub token_type: TokenKind,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
