//! Opaque access tokens. The raw token is shown exactly once, at creation;
//! only its SHA-256 hash is persisted.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A freshly generated token with its stored hash.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub token: String,
    pub token_hash: String,
}

/// Generate a 64-character hex token from two independent v4 uuids
/// (~244 bits of entropy) together with its hash.
pub fn generate() -> TokenPair {
    let token = format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    );
    let token_hash = hash_token(&token);
    TokenPair { token, token_hash }
}

/// SHA-256 of the raw token, lowercase hex. Always 64 characters.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Compare a presented token against a stored hash without early exit on
/// the first differing byte.
pub fn verify(token: &str, expected_hash: &str) -> bool {
    let computed = hash_token(token);
    if computed.len() != expected_hash.len() {
        return false;
    }
    computed
        .bytes()
        .zip(expected_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
