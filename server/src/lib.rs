//! `jeton-server`: loopback HTTP endpoint for JETON credentials.
//!
//! Three routes mirror the device lifecycle: recover the seed from its
//! encrypted transport form, read the current one-time code, and check
//! a candidate code. Everything stateful lives in `jeton-vault`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod config;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use routes::app;
pub use state::AppState;
