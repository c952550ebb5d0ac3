//! On-disk seed store.
//!
//! One credential per data directory, stored as the validated hex seed
//! in `seed.txt`. Writes go through a scratch file and rename so a
//! crash never leaves a torn seed behind, and reads re-validate so a
//! hand-edited file cannot smuggle garbage into code generation.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use jeton_crypto_core::{
    decrypt_seed, generate_code, verify_code, DecryptedSeed, RsaPrivateKey, DEFAULT_WINDOW,
};
use tempfile::NamedTempFile;
use zeroize::Zeroizing;

use crate::error::VaultError;

/// Seed file name inside the data directory.
const SEED_FILE: &str = "seed.txt";

/// Filesystem-backed store for the decrypted seed.
#[derive(Debug, Clone)]
pub struct SeedStore {
    data_dir: PathBuf,
}

impl SeedStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Path of the seed file.
    #[must_use]
    pub fn seed_path(&self) -> PathBuf {
        self.data_dir.join(SEED_FILE)
    }

    /// Whether a seed file exists on disk.
    ///
    /// Says nothing about validity; [`load`](Self::load) re-validates.
    #[must_use]
    pub fn is_provisioned(&self) -> bool {
        self.seed_path().exists()
    }

    /// Persist a validated seed, replacing any previous one.
    ///
    /// Uses an atomic write pattern (write to a scratch file, then
    /// rename) to prevent corruption from partial writes or crashes.
    /// The scratch file is unique per writer, so concurrent saves
    /// cannot interleave on a shared inode; the last rename wins with
    /// a complete seed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the write, permission change, or
    /// rename fails.
    pub fn save(&self, seed: &DecryptedSeed) -> Result<(), VaultError> {
        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(seed.expose().as_bytes())?;

        // Owner-only permissions on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
        }

        tmp.persist(self.seed_path())
            .map_err(|e| VaultError::Io(e.error))?;

        Ok(())
    }

    /// Load and re-validate the stored seed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::SeedNotProvisioned`] when no seed file
    /// exists, [`VaultError::Io`] for other read failures, and
    /// [`VaultError::Crypto`] when the contents no longer validate.
    pub fn load(&self) -> Result<DecryptedSeed, VaultError> {
        let contents = match fs::read_to_string(self.seed_path()) {
            Ok(contents) => Zeroizing::new(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(VaultError::SeedNotProvisioned);
            }
            Err(e) => return Err(VaultError::Io(e)),
        };
        Ok(DecryptedSeed::parse(&contents)?)
    }

    /// Decrypt a transported seed and persist it.
    ///
    /// The plaintext only touches disk after full validation, so a
    /// provisioned store always holds a well-formed seed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Crypto`] when decryption or validation
    /// fails and [`VaultError::Io`] when persisting fails.
    pub fn provision(
        &self,
        ciphertext_b64: &str,
        private_key: &RsaPrivateKey,
    ) -> Result<(), VaultError> {
        let seed = decrypt_seed(ciphertext_b64, private_key)?;
        self.save(&seed)
    }

    /// Current code for the stored seed plus its remaining validity in
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::SeedNotProvisioned`] when no seed is
    /// stored; other variants bubble up from [`load`](Self::load) and
    /// code generation.
    pub fn generate_current(&self, now_epoch_seconds: u64) -> Result<(String, u32), VaultError> {
        let seed = self.load()?;
        Ok(generate_code(&seed, now_epoch_seconds)?)
    }

    /// Check a candidate code against the stored seed.
    ///
    /// Total: a missing or corrupt seed counts as a failed match, the
    /// same as a wrong code.
    #[must_use = "validation result should be checked"]
    pub fn verify_candidate(&self, candidate: &str, now_epoch_seconds: u64) -> bool {
        self.load()
            .is_ok_and(|seed| verify_code(&seed, candidate, now_epoch_seconds, DEFAULT_WINDOW))
    }
}
