//! `jeton-crypto-core`: pure cryptographic primitives for JETON.
//!
//! This crate is the audit target: zero network, zero async, zero filesystem.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod keys;
pub mod seed;

pub mod totp;

pub use error::CryptoError;
pub use keys::{
    generate_keypair, parse_private_key_pem, parse_public_key_pem, private_key_to_pem,
    public_key_to_pem, DEFAULT_KEY_BITS,
};
// Key types are re-exported so callers never need a direct `rsa` dependency.
pub use rsa::{RsaPrivateKey, RsaPublicKey};
pub use seed::{
    decrypt_seed, encrypt_seed, Base32Secret, DecryptedSeed, SEED_BYTE_LEN, SEED_HEX_LEN,
};
pub use totp::{
    generate_code, generate_hotp, generate_totp, validate_totp, verify_code, OtpAlgorithm,
    OtpDigits, DEFAULT_PERIOD, DEFAULT_WINDOW,
};
