//! Cryptographic utilities

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::constants::RESET_TOKEN_BYTES;

/// Generate a random password reset token, hex encoded
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a string using SHA-256
pub fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
