//! `jeton-vault`: credential persistence for JETON.
//!
//! Owns everything that touches the filesystem: the device private key
//! and the decrypted seed. Cryptographic semantics stay in
//! `jeton-crypto-core`; this crate decides where bytes live on disk.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod keys;
pub mod store;

pub use error::VaultError;
pub use keys::{load_private_key, save_private_key, save_public_key};
pub use store::SeedStore;
