//! Authentication primitives library
//!
//! Provides the building blocks for token-based authentication:
//! - Password hashing (Argon2id)
//! - Typed, expiring JWT issuance and validation
//!
//! Services inject these into their own orchestration layer; this crate holds
//! no user model and performs no I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! ```
//!
//! ## Typed Tokens
//! ```
//! use auth::{TokenCodec, TokenKind};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec
//!     .issue("alice", TokenKind::Access, Duration::minutes(15))
//!     .unwrap();
//! let subject = codec.parse_typed(&token, TokenKind::Access).unwrap();
//! assert_eq!(subject, "alice");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenClaims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenKind;
pub use token::TokenTtls;
