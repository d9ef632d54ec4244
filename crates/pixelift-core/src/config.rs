//! Configuration module
//!
//! Environment-driven configuration for the client binaries. Values come
//! from process environment variables with sensible local defaults; the
//! binary loads `.env` via dotenvy before reading them.

use std::env;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_STATE_PATH: &str = ".pixelift_state.json";

/// Client configuration shared by the CLI and the app layer.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the enhancement backend, no trailing slash.
    pub api_base_url: String,
    /// Authenticated user's email, if a login is present. Token
    /// verification belongs to the external auth provider.
    pub email: Option<String>,
    /// Path of the local JSON key-value state file (credit refill
    /// timestamp, theme preference).
    pub state_path: String,
}

impl ClientConfig {
    /// Read configuration from the environment.
    ///
    /// `PIXELIFT_API_URL` (or `API_URL`) selects the backend,
    /// `PIXELIFT_EMAIL` identifies the logged-in user, and
    /// `PIXELIFT_STATE_PATH` overrides the local state file location.
    pub fn from_env() -> Self {
        let api_base_url = env::var("PIXELIFT_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let email = env::var("PIXELIFT_EMAIL").ok().filter(|e| !e.is_empty());

        let state_path =
            env::var("PIXELIFT_STATE_PATH").unwrap_or_else(|_| DEFAULT_STATE_PATH.to_string());

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            email,
            state_path,
        }
    }
}
