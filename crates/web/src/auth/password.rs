use sha2::{Digest, Sha256};

use crate::error::{WebError, WebResult};

/// Outcome of checking a login password against the stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Valid,
    /// Matched the pre-digest scheme; the stored hash should be replaced
    ValidLegacy,
    Invalid,
}

/// Password hashing compatible with clients that send either plain text or
/// the SHA-256 hex digest of the password. Stored hashes are
/// `bcrypt(sha256_hex)`; older accounts may still hold `bcrypt(plain)`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> WebResult<String> {
        let digest = normalize(password);
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(digest, cost))
            .await
            .map_err(|e| WebError::InternalServerError(format!("Hashing task failed: {e}")))?
            .map_err(|e| WebError::InternalServerError(format!("Failed to hash password: {e}")))
    }

    pub async fn verify(&self, password: &str, stored_hash: &str) -> WebResult<PasswordCheck> {
        let password = password.to_string();
        let stored_hash = stored_hash.to_string();

        tokio::task::spawn_blocking(move || check(&password, &stored_hash))
            .await
            .map_err(|e| WebError::InternalServerError(format!("Hashing task failed: {e}")))
    }
}

fn check(password: &str, stored_hash: &str) -> PasswordCheck {
    if bcrypt::verify(normalize(password), stored_hash).unwrap_or(false) {
        return PasswordCheck::Valid;
    }
    if !is_sha256_hex(password) && bcrypt::verify(password, stored_hash).unwrap_or(false) {
        return PasswordCheck::ValidLegacy;
    }
    PasswordCheck::Invalid
}

/// Lowercase SHA-256 hex digest of the password. Input that already is a
/// digest passes through.
pub fn normalize(password: &str) -> String {
    if is_sha256_hex(password) {
        password.to_ascii_lowercase()
    } else {
        hex::encode(Sha256::digest(password.as_bytes()))
    }
}

fn is_sha256_hex(password: &str) -> bool {
    password.len() == 64 && password.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COST: u32 = 4;

    #[test]
    fn test_normalize_digests_plain_text() {
        assert_eq!(
            normalize("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_normalize_keeps_client_digest() {
        let digest = "5E884898DA28047151D0E56F8DC6292773603D0D6AABBDD62A11EF721D1542D8";
        assert_eq!(normalize(digest), digest.to_ascii_lowercase());
    }

    #[tokio::test]
    async fn test_plain_and_digest_both_verify() {
        let hasher = PasswordHasher::new(COST);
        let stored = hasher.hash("terrero2025").await.unwrap();

        assert_eq!(
            hasher.verify("terrero2025", &stored).await.unwrap(),
            PasswordCheck::Valid
        );
        assert_eq!(
            hasher.verify(&normalize("terrero2025"), &stored).await.unwrap(),
            PasswordCheck::Valid
        );
        assert_eq!(
            hasher.verify("wrong", &stored).await.unwrap(),
            PasswordCheck::Invalid
        );
    }

    #[tokio::test]
    async fn test_legacy_hash_is_flagged() {
        let legacy = bcrypt::hash("terrero2025", COST).unwrap();
        let hasher = PasswordHasher::new(COST);

        assert_eq!(
            hasher.verify("terrero2025", &legacy).await.unwrap(),
            PasswordCheck::ValidLegacy
        );
        assert_eq!(
            hasher.verify(&normalize("terrero2025"), &legacy).await.unwrap(),
            PasswordCheck::Invalid
        );
    }

    #[test]
    fn test_malformed_stored_hash_is_invalid() {
        assert_eq!(check("anything", "not-a-bcrypt-hash"), PasswordCheck::Invalid);
    }
}
