//! Shared HTTP client for the PixeLift enhancement backend.
//!
//! Provides a minimal client over the four backend endpoints (upload,
//! enhance, gallery fetch, gallery delete) and the generic response
//! handling they share. The app and CLI crates use this client directly.
//!
//! The backend identifies the caller by the email carried in each request
//! body; there is no header auth scheme on this surface. No timeout and no
//! retry is applied here: a transient failure surfaces immediately to the
//! caller, and a hung backend hangs the call.

pub mod api;

use pixelift_core::{AppError, ClientConfig};
use reqwest::Client;

/// HTTP client for the PixeLift backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from environment configuration
    /// (`PIXELIFT_API_URL` or `API_URL`).
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(ClientConfig::from_env().api_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

/// Pull the server's own `error` message out of a response body, falling
/// back to the given generic message when the body is not JSON or carries
/// no usable error field.
pub(crate) fn server_error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| fallback.to_string())
}

// Re-export domain types for convenience.
pub use pixelift_core::models::{EnhanceResult, GalleryImage};
