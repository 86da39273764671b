use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way credential hasher.
///
/// Wraps Argon2id with a fresh random salt per call, so hashing the same
/// plaintext twice yields distinct digests that both verify. Verification is
/// constant-time with respect to the plaintext.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Returns
    /// Digest in PHC string format (algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored digest.
    ///
    /// # Returns
    /// True iff the digest was produced from this plaintext
    ///
    /// # Errors
    /// * `MalformedDigest` - Stored digest is not parseable PHC
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();

        let digest = hasher.hash("correct horse battery").expect("hash failed");

        assert!(hasher.verify("correct horse battery", &digest).unwrap());
        assert!(!hasher.verify("incorrect horse battery", &digest).unwrap());
    }

    #[test]
    fn test_salt_randomized_across_calls() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_plaintext").unwrap();
        let second = hasher.hash("same_plaintext").unwrap();

        // Distinct encodings, both valid for the plaintext
        assert_ne!(first, second);
        assert!(hasher.verify("same_plaintext", &first).unwrap());
        assert!(hasher.verify("same_plaintext", &second).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_digest() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("anything", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedDigest(_))));
    }
}
