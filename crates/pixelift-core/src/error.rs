//! Error types module
//!
//! This module provides the core error types used throughout the PixeLift
//! client. All errors are unified under the `AppError` enum which can
//! represent validation, authentication, network, and local-state errors.
//!
//! Validation and API errors carry user-facing messages and render as the
//! bare message, because callers surface them inline verbatim (including
//! messages the server itself reported). `AuthRequired` carries no text:
//! it is surfaced as a login gate, never as an inline error string.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User input failed a client-side check (bad file type, nothing
    /// selected, no enhancement chosen). Recoverable by correcting input.
    #[error("{0}")]
    Validation(String),

    /// An action that requires an authenticated user was attempted without
    /// one. Surfaced as a login prompt.
    #[error("Login required")]
    AuthRequired,

    /// The backend rejected the request or returned an unusable body. The
    /// message is the most specific one available (the server's own error
    /// string when it supplied one).
    #[error("{0}")]
    Api(String),

    /// The request never completed (connection refused, DNS, dropped body).
    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// True when the user can retry without changing anything (the failure
    /// was on the backend or network side, prior selection state is kept).
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Api(_) | AppError::Network(_))
    }

    /// The inline message to show the user, if this error renders as text.
    /// `AuthRequired` returns None: it opens the login gate instead.
    pub fn inline_message(&self) -> Option<String> {
        match self {
            AppError::AuthRequired => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_bare_message() {
        // Server-supplied messages must surface verbatim.
        let err = AppError::Api("bad file".to_string());
        assert_eq!(err.to_string(), "bad file");
    }

    #[test]
    fn validation_error_displays_bare_message() {
        let err = AppError::Validation("Please select a valid image file".to_string());
        assert_eq!(err.to_string(), "Please select a valid image file");
    }

    #[test]
    fn auth_required_has_no_inline_message() {
        assert_eq!(AppError::AuthRequired.inline_message(), None);
        assert!(AppError::Api("x".into()).inline_message().is_some());
    }

    #[test]
    fn retryable_classification() {
        assert!(AppError::Api("server down".into()).is_retryable());
        assert!(AppError::Network("refused".into()).is_retryable());
        assert!(!AppError::Validation("no file".into()).is_retryable());
        assert!(!AppError::AuthRequired.is_retryable());
    }
}
