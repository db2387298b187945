//! Error types
//!
//! `BackendError` is the wire-level shape every backend RPC may fail with; the error classifier
//! (`crate::services::classify`) reads only its two fields. `ProviderError` is the richer type
//! behind `AuthenticationResult::Failed` / `DeauthenticationResult::Failed` — either a backend
//! error propagated unchanged, or one of the two messages this provider synthesizes itself.

use std::fmt;

use thiserror::Error;

/// An error returned by a [`Backend`](crate::services::backend::Backend) RPC call.
///
/// Mirrors the abstract spec's `{statusCode, body.error.reason}` shape: an HTTP-like status
/// code, and an optional reason string the backend includes on some 500s.
#[derive(Debug, Clone)]
pub struct BackendError {
    pub status_code: u16,
    pub reason: Option<String>,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "backend call failed with status {}", self.status_code)?;
        if let Some(reason) = &self.reason {
            write!(f, ": {reason}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendError {}

impl BackendError {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            reason: None,
        }
    }

    pub fn with_reason(status_code: u16, reason: impl Into<String>) -> Self {
        Self {
            status_code,
            reason: Some(reason.into()),
        }
    }
}

/// The error behind a `Failed` result.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// A user-visible 400 this provider synthesizes itself (corrupt handshake state, or both
    /// tokens expired with no way to redirect to a fresh handshake).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A backend RPC error, propagated unchanged so the caller's HTTP layer can translate its
    /// status code.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ProviderError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// The backend status code this error ultimately maps to, for callers that want to
    /// translate it to an HTTP response without matching on the enum themselves.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Backend(err) => err.status_code,
        }
    }
}
