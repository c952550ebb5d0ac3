//! HTTP routes: seed recovery, code generation, code verification.
//!
//! Wire contract:
//! - Every error body is `{"error": "..."}`.
//! - Recovery failures after key load collapse to one fixed message, so
//!   the endpoint cannot serve as a decryption oracle.

// Handlers are async for axum even when the work inside is sync.
#![allow(clippy::unused_async)]

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use jeton_vault::{load_private_key, VaultError};

use crate::state::AppState;

/// Build the service router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/decrypt-seed", post(decrypt_seed))
        .route("/generate-2fa", get(generate_2fa))
        .route("/verify-2fa", post(verify_2fa))
        .with_state(state)
}

/// Seconds since the Unix epoch; 0 if the clock sits before it.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

type ApiResponse = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, message: &str) -> ApiResponse {
    (status, Json(serde_json::json!({ "error": message })))
}

// ── POST /decrypt-seed ──────────────────────────────────────────────

#[derive(Deserialize)]
struct DecryptRequest {
    encrypted_seed: String,
}

async fn decrypt_seed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DecryptRequest>,
) -> ApiResponse {
    let private_key = match load_private_key(&state.config.private_key_path) {
        Ok(key) => key,
        Err(VaultError::PrivateKeyMissing { path }) => {
            tracing::error!("private key not found at {path}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Private key not found");
        }
        Err(e) => {
            tracing::warn!("private key unusable: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Decryption failed");
        }
    };

    match state.store.provision(&req.encrypted_seed, &private_key) {
        Ok(()) => {
            tracing::info!("seed provisioned");
            (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
        }
        Err(e) => {
            // The fixed wire message hides which stage failed; the log
            // keeps the detail (never the payload).
            tracing::warn!("seed recovery failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Decryption failed")
        }
    }
}

// ── GET /generate-2fa ───────────────────────────────────────────────

async fn generate_2fa(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.generate_current(unix_now()) {
        Ok((code, valid_for)) => {
            // The code itself never reaches the log.
            tracing::info!("code generated, {valid_for}s left in step");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "code": code, "valid_for": valid_for })),
            )
        }
        Err(VaultError::SeedNotProvisioned) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Seed not decrypted yet")
        }
        Err(e) => {
            tracing::warn!("code generation failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

// ── POST /verify-2fa ────────────────────────────────────────────────

#[derive(Deserialize)]
struct VerifyRequest {
    code: String,
}

async fn verify_2fa(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> ApiResponse {
    if req.code.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing code");
    }
    if !state.store.is_provisioned() {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Seed not decrypted yet");
    }

    let valid = state.store.verify_candidate(&req.code, unix_now());
    tracing::info!("code verification: {valid}");
    (StatusCode::OK, Json(serde_json::json!({ "valid": valid })))
}
