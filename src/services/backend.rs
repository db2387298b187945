//! The backend RPC interface
//!
//! `Backend` is the narrow capability this provider needs from the identity-aware cluster
//! service. It is modelled as a trait rather than a concrete HTTP client because the transport,
//! the SAML XML parsing, and the cryptographic validation of assertions are all explicitly the
//! backend's job (see spec §1) — this crate only needs to call it and interpret the outcome.
//!
//! Every call can run in one of two modes, matching the source system's two credential postures:
//! *as-user* (`authenticate`, forwarding the caller's own `Authorization` header) and
//! *as-internal* (the rest, using a privileged service-account credential the embedding
//! application's `Backend` implementation owns).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::error::BackendError;

/// Response to `samlPrepare`: the backend's freshly minted request id, and the URL to redirect
/// the user to at the IdP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamlPrepareResponse {
    pub id: String,
    pub redirect: String,
}

/// Response to `samlAuthenticate` and `getAccessToken`: a fresh access/refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Response to `samlLogout` and `samlInvalidate`: an optional URL to complete SAML Single Logout
/// at the IdP. `None` means there is no further IdP-side step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub redirect: Option<String>,
}

/// The backend RPC surface this provider calls. Implemented by the embedding application against
/// its real transport; implemented by a hand-rolled fake in this crate's tests.
#[async_trait]
pub trait Backend: Send + Sync {
    /// As-user: identify the caller from the given `Authorization` header value.
    async fn authenticate(
        &self,
        authorization: &str,
    ) -> Result<crate::models::BackendUser, BackendError>;

    /// As-internal: begin an SP-initiated handshake for the given ACS URL.
    async fn saml_prepare(&self, acs: &str) -> Result<SamlPrepareResponse, BackendError>;

    /// As-internal: exchange an ACS `SAMLResponse` for a token pair. `ids` is the list of
    /// outstanding request ids the response may be answering (empty for IdP-initiated flows).
    async fn saml_authenticate(
        &self,
        ids: &[String],
        content: &str,
    ) -> Result<TokenPair, BackendError>;

    /// As-internal: exchange a refresh token for a new access/refresh pair.
    async fn get_access_token(&self, refresh_token: &str) -> Result<TokenPair, BackendError>;

    /// As-internal: user-initiated logout.
    async fn saml_logout(
        &self,
        token: &str,
        refresh_token: Option<&str>,
    ) -> Result<LogoutResponse, BackendError>;

    /// As-internal: IdP-initiated Single Logout.
    async fn saml_invalidate(
        &self,
        query_string: &str,
        acs: &str,
    ) -> Result<LogoutResponse, BackendError>;
}
