use thiserror::Error;

use super::claims::TokenKind;

/// Error type for token issuance and validation.
///
/// Validation failures are deliberately split into sub-kinds so callers can
/// surface an expired token differently from a tampered or garbled one.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature does not verify")]
    BadSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
}
