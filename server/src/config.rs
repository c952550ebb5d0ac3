//! Server configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming the data directory.
const ENV_DATA_DIR: &str = "JETON_DATA_DIR";
/// Environment variable naming the private key file.
const ENV_PRIVATE_KEY: &str = "JETON_PRIVATE_KEY";
/// Environment variable naming the bind address.
const ENV_BIND: &str = "JETON_BIND";

/// Production data directory, used whenever it exists on the host.
const SYSTEM_DATA_DIR: &str = "/data";
/// Fallback data directory for local development runs.
const LOCAL_DATA_DIR: &str = "./data_test";

const DEFAULT_PRIVATE_KEY: &str = "student_private.pem";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the seed store.
    pub data_dir: PathBuf,
    /// PKCS#8 PEM file with the device private key.
    pub private_key_path: PathBuf,
    /// Socket address to listen on.
    pub bind: SocketAddr,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `JETON_BIND` does not parse
    /// as a socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            data_dir: env::var(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            private_key_path: env::var(ENV_PRIVATE_KEY)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PRIVATE_KEY)),
            bind: env::var(ENV_BIND)
                .unwrap_or_else(|_| DEFAULT_BIND.to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid(ENV_BIND.to_string()))?,
        })
    }
}

/// `/data` when present (container deployments), `./data_test` otherwise.
fn default_data_dir() -> PathBuf {
    let system = Path::new(SYSTEM_DATA_DIR);
    if system.is_dir() {
        system.to_path_buf()
    } else {
        PathBuf::from(LOCAL_DATA_DIR)
    }
}
