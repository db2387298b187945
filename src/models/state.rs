//! Provider session state
//!
//! `ProviderState` is the opaque value the caller persists between requests (in a cookie, a
//! signed session blob, whatever their session store prefers). The provider never reads or
//! writes storage itself; it only constructs and inspects this value.

use serde::{Deserialize, Serialize};

/// Session state carried between requests by the caller's session store.
///
/// All fields are optional. In practice only two shapes occur: the handshake phase carries
/// `request_id` + `next_url`, the established phase carries `access_token` + `refresh_token`.
/// A state with `request_id` but no `next_url` (or vice versa) is a protocol error the provider
/// treats as a hard failure on the next `SAMLResponse` (see [`crate::services::provider`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderState {
    pub request_id: Option<String>,
    pub next_url: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl ProviderState {
    /// Construct the handshake-phase shape: a pending SP-initiated request id plus the URL to
    /// return the user to once the assertion comes back.
    pub fn handshake(request_id: impl Into<String>, next_url: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            next_url: Some(next_url.into()),
            access_token: None,
            refresh_token: None,
        }
    }

    /// Construct the established-phase shape: an access/refresh token pair.
    pub fn tokens(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            request_id: None,
            next_url: None,
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// True if this state has a complete handshake pair (`request_id` + `next_url`).
    pub fn has_handshake(&self) -> bool {
        self.request_id.is_some() && self.next_url.is_some()
    }

    /// True if neither half of the handshake pair is present.
    pub fn has_no_handshake(&self) -> bool {
        self.request_id.is_none() && self.next_url.is_none()
    }

    /// True if exactly one half of the handshake pair is present — the corrupt-state case.
    pub fn has_partial_handshake(&self) -> bool {
        self.request_id.is_some() != self.next_url.is_some()
    }
}
