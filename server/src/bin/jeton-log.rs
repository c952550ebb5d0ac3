//! Cron liveness logger: prints the current code with a UTC timestamp.
//!
//! Usage: `jeton-log`
//!
//! Reads the same store as the server (`JETON_DATA_DIR`, or the `/data`
//! fallback) and writes one line to stdout:
//!
//! ```text
//! 2026-08-22 09:15:30 - 2FA Code: 123456
//! ```
//!
//! Failures go to stderr and the exit status stays zero either way, so
//! a cron redirect captures the outcome without aborting the schedule.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;
use jeton_server::ServerConfig;
use jeton_vault::{SeedStore, VaultError};

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// One log line: UTC wall-clock timestamp plus the code.
fn log_line(code: &str, epoch_seconds: u64) -> String {
    let timestamp = DateTime::from_timestamp(i64::try_from(epoch_seconds).unwrap_or(0), 0)
        .unwrap_or_default()
        .format("%Y-%m-%d %H:%M:%S");
    format!("{timestamp} - 2FA Code: {code}")
}

fn main() {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return;
        }
    };

    let store = match SeedStore::open(config.data_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening seed store: {e}");
            return;
        }
    };

    let now = unix_now();
    match store.generate_current(now) {
        Ok((code, _)) => println!("{}", log_line(&code, now)),
        Err(VaultError::SeedNotProvisioned) => {
            eprintln!("Seed file not found at {}", store.seed_path().display());
        }
        Err(e) => eprintln!("Error generating code: {e}"),
    }
}
