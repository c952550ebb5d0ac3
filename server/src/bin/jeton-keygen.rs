//! Enrollment tool: writes a fresh device keypair as PEM files.
//!
//! Usage: `jeton-keygen [OUT_DIR]` (defaults to the current directory).
//! Produces `student_private.pem` (PKCS#8, owner-only) for the device
//! and `student_public.pem` (SPKI) for the issuing side, then proves
//! the written pair works by round-tripping a throwaway seed.

use std::env;
use std::path::PathBuf;

use data_encoding::HEXLOWER;
use jeton_crypto_core::{
    decrypt_seed, encrypt_seed, generate_keypair, DecryptedSeed, DEFAULT_KEY_BITS, SEED_BYTE_LEN,
};
use jeton_vault::{load_private_key, save_private_key, save_public_key};
use rand::rngs::OsRng;
use rand::RngCore;

const PRIVATE_KEY_FILE: &str = "student_private.pem";
const PUBLIC_KEY_FILE: &str = "student_public.pem";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    println!("Generating {DEFAULT_KEY_BITS}-bit RSA keypair (this can take a while)...");
    let (private, public) = generate_keypair(DEFAULT_KEY_BITS)?;

    let private_path = out_dir.join(PRIVATE_KEY_FILE);
    let public_path = out_dir.join(PUBLIC_KEY_FILE);
    save_private_key(&private_path, &private)?;
    save_public_key(&public_path, &public)?;

    // Round-trip a throwaway seed through the key as written to disk,
    // not the in-memory copy.
    let reloaded = load_private_key(&private_path)?;
    let mut seed_bytes = [0u8; SEED_BYTE_LEN];
    OsRng.fill_bytes(&mut seed_bytes);
    let seed = DecryptedSeed::parse(&HEXLOWER.encode(&seed_bytes))?;
    let ciphertext = encrypt_seed(&seed, &public)?;
    let recovered = decrypt_seed(&ciphertext, &reloaded)?;
    if recovered.expose() != seed.expose() {
        return Err("self-check failed: recovered seed does not match".into());
    }

    println!("Wrote {}", private_path.display());
    println!("Wrote {}", public_path.display());
    println!("Self-check passed");
    Ok(())
}
