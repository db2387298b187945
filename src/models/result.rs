//! Outcome values returned by [`crate::services::provider::SamlProvider`]
//!
//! The source implementation this is rewritten from represents these as a small class
//! hierarchy with `instanceof`-style checks. Here they are tagged `enum`s: exactly one variant
//! is ever active, and the compiler enforces that callers handle every case.

use serde_json::Value;

use crate::models::state::ProviderState;
use crate::utils::error::ProviderError;

/// The identified user as reported by the backend's `authenticate` call.
///
/// The backend owns the shape of this object (it is, from this provider's point of view, an
/// opaque identity-aware service response); we carry it as `serde_json::Value` rather than
/// inventing a schema this crate has no authority over.
pub type BackendUser = Value;

/// Outcome of [`SamlProvider::authenticate`](crate::services::provider::SamlProvider::authenticate).
#[derive(Debug, Clone)]
pub enum AuthenticationResult {
    /// This provider declines; the caller should try the next provider in its chain.
    NotHandled,
    /// The user was identified. `new_state`, when present, replaces the caller's persisted
    /// [`ProviderState`]; its absence means the existing credential already sufficed.
    Succeeded {
        user: BackendUser,
        new_state: Option<ProviderState>,
    },
    /// The attempt resolved to a definite failure.
    Failed { error: ProviderError },
    /// The caller must respond with a redirect to `url`, optionally rotating persisted state.
    Redirect {
        url: String,
        new_state: Option<ProviderState>,
    },
}

impl AuthenticationResult {
    pub fn not_handled() -> Self {
        Self::NotHandled
    }

    pub fn succeeded(user: BackendUser) -> Self {
        Self::Succeeded {
            user,
            new_state: None,
        }
    }

    pub fn succeeded_with_state(user: BackendUser, new_state: ProviderState) -> Self {
        Self::Succeeded {
            user,
            new_state: Some(new_state),
        }
    }

    pub fn failed(error: impl Into<ProviderError>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn redirect_to(url: impl Into<String>) -> Self {
        Self::Redirect {
            url: url.into(),
            new_state: None,
        }
    }

    pub fn redirect_to_with_state(url: impl Into<String>, new_state: ProviderState) -> Self {
        Self::Redirect {
            url: url.into(),
            new_state: Some(new_state),
        }
    }

    pub fn is_not_handled(&self) -> bool {
        matches!(self, Self::NotHandled)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn user(&self) -> Option<&BackendUser> {
        match self {
            Self::Succeeded { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn state(&self) -> Option<&ProviderState> {
        match self {
            Self::Succeeded { new_state, .. } | Self::Redirect { new_state, .. } => {
                new_state.as_ref()
            }
            _ => None,
        }
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Outcome of [`SamlProvider::deauthenticate`](crate::services::provider::SamlProvider::deauthenticate).
#[derive(Debug, Clone)]
pub enum DeauthenticationResult {
    /// This provider has nothing to do with this request.
    NotHandled,
    /// The caller must redirect to `url` to complete (or simulate) logout.
    Redirect { url: String },
    /// The attempt resolved to a definite failure.
    Failed { error: ProviderError },
}

impl DeauthenticationResult {
    pub fn not_handled() -> Self {
        Self::NotHandled
    }

    pub fn redirect_to(url: impl Into<String>) -> Self {
        Self::Redirect { url: url.into() }
    }

    pub fn failed(error: impl Into<ProviderError>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_not_handled(&self) -> bool {
        matches!(self, Self::NotHandled)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect { url } => Some(url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}
