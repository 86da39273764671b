use std::fmt::Write as _;

use async_trait::async_trait;
use sha2::Digest;
use sha2::Sha256;

use crate::account::errors::AvatarError;
use crate::account::models::EmailAddress;
use crate::account::ports::AvatarResolver;

const DEFAULT_BASE_URL: &str = "https://www.gravatar.com";

/// Gravatar-style implementation of [`AvatarResolver`].
///
/// Derives the avatar URL from a SHA-256 digest of the normalized (trimmed,
/// lowercased) email address. Pure URL derivation, no network call, so it
/// never actually fails; the port stays fallible for providers that do.
pub struct GravatarResolver {
    base_url: String,
}

impl GravatarResolver {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for GravatarResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvatarResolver for GravatarResolver {
    async fn resolve(&self, email: &EmailAddress) -> Result<String, AvatarError> {
        let normalized = email.as_str().trim().to_lowercase();
        let digest = Sha256::digest(normalized.as_bytes());

        let mut hash = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hash, "{:02x}", byte);
        }

        Ok(format!("{}/avatar/{}?d=identicon", self.base_url, hash))
    }
}
