//! Device keypair files.
//!
//! The private key lives next to the data directory as PKCS#8 PEM and is
//! read on every recovery request, so a rotated key takes effect without
//! a restart. The public half is only ever written, for handing to the
//! issuing side.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use jeton_crypto_core::{
    parse_private_key_pem, private_key_to_pem, public_key_to_pem, RsaPrivateKey, RsaPublicKey,
};
use zeroize::Zeroizing;

use crate::error::VaultError;

/// Load and parse the device private key from a PKCS#8 PEM file.
///
/// # Errors
///
/// Returns [`VaultError::PrivateKeyMissing`] when the file does not
/// exist, [`VaultError::Io`] for other filesystem failures, and
/// [`VaultError::Crypto`] when the contents do not parse as a key.
pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey, VaultError> {
    let pem = match fs::read_to_string(path) {
        Ok(contents) => Zeroizing::new(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(VaultError::PrivateKeyMissing {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(VaultError::Io(e)),
    };
    Ok(parse_private_key_pem(&pem)?)
}

/// Write the private key as PKCS#8 PEM with owner-only permissions.
///
/// # Errors
///
/// Returns [`VaultError::Crypto`] if PEM encoding fails and
/// [`VaultError::Io`] if the write or permission change fails.
pub fn save_private_key(path: &Path, key: &RsaPrivateKey) -> Result<(), VaultError> {
    let pem = private_key_to_pem(key)?;
    fs::write(path, pem.as_bytes())?;

    // Owner-only on Unix, like the seed file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Write the public key as SPKI PEM.
///
/// # Errors
///
/// Returns [`VaultError::Crypto`] if PEM encoding fails and
/// [`VaultError::Io`] if the write fails.
pub fn save_public_key(path: &Path, key: &RsaPublicKey) -> Result<(), VaultError> {
    let pem = public_key_to_pem(key)?;
    fs::write(path, pem.as_bytes())?;
    Ok(())
}
