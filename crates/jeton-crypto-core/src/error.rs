//! Cryptographic error types for `jeton-crypto-core`.

use thiserror::Error;

/// Errors produced by cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Input bytes or text could not be decoded (bad base64, non-UTF-8 plaintext).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// OAEP encryption failure (payload too long for the modulus).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// RSA-OAEP decryption failed. Carries no detail: a wrong key and a
    /// tampered ciphertext are indistinguishable to the caller.
    #[error("decryption failed")]
    Decryption,

    /// Decrypted text fails the seed shape check (length or charset).
    #[error("seed validation failed: {0}")]
    Validation(String),

    /// A validated seed could not be converted between representations.
    #[error("secret format error: {0}")]
    SecretFormat(String),

    /// Invalid key material (unparseable PEM, wrong key type).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// TOTP/HOTP generation or validation error.
    #[error("OTP error: {0}")]
    Otp(String),
}
