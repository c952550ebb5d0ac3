//! Error types for `jeton-vault`.

use jeton_crypto_core::CryptoError;
use thiserror::Error;

/// Errors produced by credential persistence operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Cryptographic operation failed (delegated from crypto-core).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No decrypted seed has been stored yet.
    #[error("seed not provisioned")]
    SeedNotProvisioned,

    /// The device private key file is absent.
    #[error("private key not found: {path}")]
    PrivateKeyMissing {
        /// Path that was checked.
        path: String,
    },
}
