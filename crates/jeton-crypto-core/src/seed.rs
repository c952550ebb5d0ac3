//! Seed recovery, validation, and re-encoding.
//!
//! A provisioning authority encrypts a 256-bit seed, rendered as 64 hex
//! characters, under this device's RSA public key using OAEP with SHA-256.
//! [`decrypt_seed`] reverses that transport step and applies the shape
//! check; only values that pass become [`DecryptedSeed`] credentials.

use std::fmt;

use data_encoding::{BASE32, BASE64, HEXLOWER_PERMISSIVE};
use rand::rngs::OsRng;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;

// ── Constants ───────────────────────────────────────────────────────

/// Hex length of a well-formed seed (64 characters, 256 bits).
pub const SEED_HEX_LEN: usize = 64;

/// Raw byte length of a decoded seed.
pub const SEED_BYTE_LEN: usize = 32;

// ── DecryptedSeed ───────────────────────────────────────────────────

/// A validated seed credential.
///
/// Construction goes through [`DecryptedSeed::parse`], so every value of
/// this type satisfies the shape invariant: exactly 64 characters, all in
/// `[0-9a-fA-F]`. Contents are masked in `Debug` and `Display` output.
pub struct DecryptedSeed {
    inner: SecretString,
}

impl DecryptedSeed {
    /// Validate `text` as a seed after trimming surrounding whitespace.
    ///
    /// Both hex cases are accepted and the text is kept as received, with
    /// no case normalization.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Validation`] when the trimmed text is not
    /// exactly 64 characters or contains a non-hex character. The message
    /// carries the observed length or the offending character class,
    /// never the text itself.
    pub fn parse(text: &str) -> Result<Self, CryptoError> {
        let trimmed = text.trim();
        let len = trimmed.chars().count();
        if len != SEED_HEX_LEN {
            return Err(CryptoError::Validation(format!(
                "decrypted seed length is {len}, expected {SEED_HEX_LEN}"
            )));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CryptoError::Validation(
                "decrypted seed contains non-hex characters".to_owned(),
            ));
        }
        Ok(Self {
            inner: SecretString::from(trimmed.to_owned()),
        })
    }

    /// Expose the hex text. Use sparingly, only when the value is needed
    /// for a cryptographic operation or persistence.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Decode the seed to its 32 raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SecretFormat`] if the hex decode fails.
    /// Cannot happen for a value built by [`DecryptedSeed::parse`], but
    /// is handled rather than asserted.
    pub fn seed_bytes(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        // HEXLOWER_PERMISSIVE accepts both cases on input.
        HEXLOWER_PERMISSIVE
            .decode(self.expose().as_bytes())
            .map(Zeroizing::new)
            .map_err(|e| CryptoError::SecretFormat(format!("seed hex decode failed: {e}")))
    }

    /// Re-encode the seed in the RFC 4648 base32 alphabet with padding,
    /// the input format for one-time-password derivation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SecretFormat`] if the hex decode fails (see
    /// [`DecryptedSeed::seed_bytes`]).
    pub fn to_base32(&self) -> Result<Base32Secret, CryptoError> {
        let raw = self.seed_bytes()?;
        Ok(Base32Secret {
            inner: SecretString::from(BASE32.encode(&raw)),
        })
    }
}

impl fmt::Debug for DecryptedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecryptedSeed(***)")
    }
}

impl fmt::Display for DecryptedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecryptedSeed(***)")
    }
}

// ── Base32Secret ────────────────────────────────────────────────────

/// The seed re-encoded for one-time-password derivation.
///
/// Derived from a [`DecryptedSeed`] and never persisted. A 32-byte seed
/// encodes to 56 characters including the `====` pad tail. The alphabet
/// is uppercase `A-Z`, `2-7` (RFC 4648).
pub struct Base32Secret {
    inner: SecretString,
}

impl Base32Secret {
    /// Expose the base32 text.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Decode back to the raw key bytes used as the HMAC key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SecretFormat`] if the base32 decode fails.
    pub fn decode(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        BASE32
            .decode(self.expose().as_bytes())
            .map(Zeroizing::new)
            .map_err(|e| CryptoError::SecretFormat(format!("base32 decode failed: {e}")))
    }
}

impl fmt::Debug for Base32Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Base32Secret(***)")
    }
}

impl fmt::Display for Base32Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Base32Secret(***)")
    }
}

// ── Seed transport ──────────────────────────────────────────────────

/// Recover and validate a seed from its transport form.
///
/// `ciphertext_b64` is base64 text wrapping an RSA-OAEP ciphertext whose
/// decoded length equals the key's modulus size. OAEP uses SHA-256 for
/// both the digest and the MGF1 mask, with no label.
///
/// # Errors
///
/// - [`CryptoError::Encoding`]: malformed base64, or plaintext that is
///   not valid UTF-8.
/// - [`CryptoError::Decryption`]: OAEP failure. No detail is attached; a
///   wrong key and a tampered ciphertext are indistinguishable.
/// - [`CryptoError::Validation`]: plaintext fails the 64-hex shape check.
pub fn decrypt_seed(
    ciphertext_b64: &str,
    private_key: &RsaPrivateKey,
) -> Result<DecryptedSeed, CryptoError> {
    let ciphertext = BASE64
        .decode(ciphertext_b64.trim().as_bytes())
        .map_err(|e| CryptoError::Encoding(format!("invalid base64 ciphertext: {e}")))?;

    let plaintext = private_key
        .decrypt(Oaep::new::<Sha256>(), &ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::Decryption)?;

    // The UTF-8 failure path must not carry the plaintext bytes.
    let text = std::str::from_utf8(&plaintext)
        .map_err(|_| CryptoError::Encoding("decrypted payload is not valid UTF-8".to_owned()))?;

    DecryptedSeed::parse(text)
}

/// Encrypt a seed for transport, the issuer half of [`decrypt_seed`].
///
/// Produces base64 text wrapping the OAEP-SHA256 ciphertext. Used by key
/// tooling self-checks and round-trip tests.
///
/// # Errors
///
/// Returns [`CryptoError::Encryption`] if the OAEP encryption fails
/// (seed text longer than the modulus allows).
pub fn encrypt_seed(
    seed: &DecryptedSeed,
    public_key: &RsaPublicKey,
) -> Result<String, CryptoError> {
    let mut rng = OsRng;
    let ciphertext = public_key
        .encrypt(&mut rng, Oaep::new::<Sha256>(), seed.expose().as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("OAEP encryption failed: {e}")))?;
    Ok(BASE64.encode(&ciphertext))
}

// ── Tests ───────────────────────────────────────────────────────────
