//! Backend error classifier (§4.D)
//!
//! Maps a [`BackendError`] to one of three categories the provider's strategy chain reacts to.
//! The `TokenExpired` 500-with-reason case is a documented workaround for a backend bug (spec
//! §9); it is written as its own match arm so collapsing it to a plain `401` check, if the
//! backend is ever fixed, is a one-line change.

use crate::utils::error::BackendError;

/// The one reason string a 500 carries when it actually means "your token expired", per the
/// backend's documented quirk.
const TOKEN_DOCUMENT_MISSING_REASON: &str = "token document is missing and must be present";

/// Outcome of classifying a [`BackendError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The access token is expired (or the backend's workaround-shaped 500 stand-in for it).
    TokenExpired,
    /// A refresh token was rejected (single-use, already consumed, or otherwise invalid).
    RefreshRejected,
    /// Anything else.
    Other,
}

/// Classify a backend error per §4.D.
pub fn classify(error: &BackendError) -> ErrorCategory {
    match error.status_code {
        401 => ErrorCategory::TokenExpired,
        500 if error.reason.as_deref() == Some(TOKEN_DOCUMENT_MISSING_REASON) => {
            ErrorCategory::TokenExpired
        }
        400 => ErrorCategory::RefreshRejected,
        _ => ErrorCategory::Other,
    }
}
