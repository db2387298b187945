//! The SAML provider state machine (§4.E)
//!
//! `SamlProvider::authenticate` tries a fixed chain of credential-extraction strategies in
//! order — header, state, refresh, payload, handshake — and returns the first result that isn't
//! `NotHandled`. `SamlProvider::deauthenticate` drives the logout counterpart, including
//! IdP-initiated Single Logout.
//!
//! Every decision point logs on `security::saml` at debug level with only non-sensitive fields:
//! an `outcome` name, and where available a `request_id` or `username` — never a token or the
//! raw SAML payload.

use std::sync::Arc;

use tracing::debug;

use crate::config::ProviderOptions;
use crate::models::{AuthenticationResult, DeauthenticationResult, ProviderState, Request};
use crate::services::backend::Backend;
use crate::services::classify::{classify, ErrorCategory};
use crate::utils::error::ProviderError;

/// A SAML 2.0 Web-SSO authentication provider.
///
/// Stateless and immutable once constructed; safe to share across concurrent requests (it is
/// `Clone`, cheaply, via the `Arc`-held backend).
#[derive(Clone)]
pub struct SamlProvider {
    options: ProviderOptions,
}

/// Best-effort username extraction for logging only; the backend's user shape is opaque to this
/// crate (see [`crate::models::BackendUser`]), so this never fails the call if the field is
/// missing or not a string.
fn username_of(user: &crate::models::BackendUser) -> Option<&str> {
    user.as_object()?.get("username")?.as_str()
}

impl SamlProvider {
    pub fn new(options: ProviderOptions) -> Self {
        Self { options }
    }

    fn backend(&self) -> &Arc<dyn Backend> {
        &self.options.client
    }

    /// The ACS (Assertion Consumer Service) URL this service provider identifies itself with
    /// (§4.E.3).
    pub fn acs_url(&self) -> String {
        format!(
            "{}://{}:{}{}/api/security/v1/saml",
            self.options.protocol, self.options.hostname, self.options.port, self.options.base_path
        )
    }

    /// Try each strategy in order; the first to return `Some` wins.
    pub async fn authenticate(
        &self,
        request: &mut Request,
        prior_state: Option<&ProviderState>,
    ) -> AuthenticationResult {
        if let Some(result) = self.via_header(request).await {
            return result;
        }

        if let Some(state) = prior_state {
            if let Some(result) = self.via_state(request, state).await {
                return result;
            }
            if let Some(result) = self.via_refresh(request, state).await {
                return result;
            }
        }

        if let Some(result) = self.via_payload(request, prior_state).await {
            return result;
        }

        self.via_handshake(request).await
    }

    /// Step 1: via the `Authorization` header already present on the request.
    async fn via_header(&self, request: &mut Request) -> Option<AuthenticationResult> {
        use crate::models::AuthorizationHeader::*;

        match request.authorization_header() {
            Absent => {
                debug!(target: "security::saml", outcome = "continue", "no Authorization header, trying next strategy");
                None
            }
            Unrecognized => {
                debug!(target: "security::saml", outcome = "not_handled", "Authorization header present with unrecognized scheme");
                Some(AuthenticationResult::NotHandled)
            }
            Bearer(token) => {
                let authorization = format!("Bearer {token}");
                Some(match self.backend().authenticate(&authorization).await {
                    Ok(user) => {
                        debug!(target: "security::saml", outcome = "succeeded", username = username_of(&user), "authenticated via Authorization header");
                        AuthenticationResult::succeeded(user)
                    }
                    Err(err) => {
                        debug!(target: "security::saml", outcome = "failed", "Authorization header rejected by backend");
                        AuthenticationResult::failed(err)
                    }
                })
            }
        }
    }

    /// Step 2: via the access token carried in prior state.
    async fn via_state(
        &self,
        request: &mut Request,
        state: &ProviderState,
    ) -> Option<AuthenticationResult> {
        let access_token = state.access_token.as_deref()?;

        let authorization = format!("Bearer {access_token}");
        request.authorization = Some(authorization.clone());
        let outcome = self.backend().authenticate(&authorization).await;
        request.authorization = None;

        match outcome {
            Ok(user) => {
                debug!(target: "security::saml", outcome = "succeeded", username = username_of(&user), "authenticated via persisted access token");
                Some(AuthenticationResult::succeeded(user))
            }
            Err(err) => {
                if classify(&err) == ErrorCategory::TokenExpired {
                    debug!(target: "security::saml", outcome = "continue", "persisted access token expired, trying refresh");
                    None
                } else {
                    debug!(target: "security::saml", outcome = "failed", "persisted access token rejected by backend");
                    Some(AuthenticationResult::failed(err))
                }
            }
        }
    }

    /// Step 3: via the refresh token carried in prior state.
    async fn via_refresh(
        &self,
        request: &mut Request,
        state: &ProviderState,
    ) -> Option<AuthenticationResult> {
        let refresh_token = state.refresh_token.as_deref()?;

        match self.backend().get_access_token(refresh_token).await {
            Ok(pair) => {
                let authorization = format!("Bearer {}", pair.access_token);
                request.authorization = Some(authorization.clone());
                let outcome = self.backend().authenticate(&authorization).await;
                request.authorization = None;

                Some(match outcome {
                    Ok(user) => {
                        debug!(target: "security::saml", outcome = "succeeded", username = username_of(&user), "authenticated after refreshing access token");
                        AuthenticationResult::succeeded_with_state(
                            user,
                            ProviderState::tokens(pair.access_token, pair.refresh_token),
                        )
                    }
                    Err(err) => {
                        debug!(target: "security::saml", outcome = "failed", "refreshed access token rejected by backend");
                        AuthenticationResult::failed(err)
                    }
                })
            }
            Err(err) => {
                if classify(&err) == ErrorCategory::RefreshRejected {
                    if request.can_redirect() {
                        debug!(target: "security::saml", outcome = "continue", "refresh token rejected, falling through to handshake");
                        None
                    } else {
                        debug!(target: "security::saml", outcome = "failed", "refresh token rejected and request cannot redirect");
                        Some(AuthenticationResult::failed(ProviderError::bad_request(
                            "Both access and refresh tokens are expired.",
                        )))
                    }
                } else {
                    debug!(target: "security::saml", outcome = "failed", "refresh call rejected by backend");
                    Some(AuthenticationResult::failed(err))
                }
            }
        }
    }

    /// Step 4: via an ACS callback payload (`SAMLResponse` in the request body).
    async fn via_payload(
        &self,
        request: &Request,
        prior_state: Option<&ProviderState>,
    ) -> Option<AuthenticationResult> {
        let saml_response = request.saml_response()?;

        let ids = match prior_state {
            None => {
                debug!(target: "security::saml", outcome = "continue", "ACS callback, IdP-initiated (no prior state)");
                Vec::new()
            }
            Some(state) if state.has_no_handshake() => {
                debug!(target: "security::saml", outcome = "continue", "ACS callback, IdP-initiated (empty prior state)");
                Vec::new()
            }
            Some(state) if state.has_handshake() => {
                let request_id = state.request_id.clone().unwrap();
                debug!(target: "security::saml", outcome = "continue", request_id = %request_id, "ACS callback, SP-initiated");
                vec![request_id]
            }
            Some(_) => {
                debug!(target: "security::saml", outcome = "failed", "ACS callback with corrupt prior state");
                return Some(AuthenticationResult::failed(ProviderError::bad_request(
                    "SAML response state does not have corresponding request id or redirect URL.",
                )));
            }
        };

        let is_sp_initiated = !ids.is_empty();
        let outcome = self.backend().saml_authenticate(&ids, saml_response).await;

        Some(match outcome {
            Ok(pair) => {
                let redirect_url = if is_sp_initiated {
                    prior_state.and_then(|s| s.next_url.clone()).unwrap_or_default()
                } else {
                    format!("{}/", self.options.base_path)
                };
                debug!(target: "security::saml", outcome = "redirect", "ACS callback accepted by backend");
                AuthenticationResult::redirect_to_with_state(
                    redirect_url,
                    ProviderState::tokens(pair.access_token, pair.refresh_token),
                )
            }
            Err(err) => {
                debug!(target: "security::saml", outcome = "failed", "ACS callback rejected by backend");
                AuthenticationResult::failed(err)
            }
        })
    }

    /// Step 5: initiate a fresh SP-initiated handshake.
    async fn via_handshake(&self, request: &Request) -> AuthenticationResult {
        if !request.can_redirect() {
            debug!(target: "security::saml", outcome = "not_handled", "request cannot redirect, declining to start handshake");
            return AuthenticationResult::NotHandled;
        }

        match self.backend().saml_prepare(&self.acs_url()).await {
            Ok(prepared) => {
                debug!(target: "security::saml", outcome = "redirect", request_id = %prepared.id, "starting SP-initiated handshake");
                let next_url = format!("{}{}", request.base_path, request.path);
                AuthenticationResult::redirect_to_with_state(
                    prepared.redirect,
                    ProviderState::handshake(prepared.id, next_url),
                )
            }
            Err(err) => {
                debug!(target: "security::saml", outcome = "failed", "samlPrepare call rejected by backend");
                AuthenticationResult::failed(err)
            }
        }
    }

    /// Deauthenticate: user-initiated logout, or IdP-initiated Single Logout (§4.E.2).
    pub async fn deauthenticate(
        &self,
        request: &Request,
        prior_state: Option<&ProviderState>,
    ) -> DeauthenticationResult {
        let has_access_token = prior_state
            .and_then(|s| s.access_token.as_ref())
            .is_some();
        let saml_request = request.saml_request();

        if !has_access_token && saml_request.is_none() {
            debug!(target: "security::saml", outcome = "not_handled", "nothing to log out");
            return DeauthenticationResult::NotHandled;
        }

        let outcome = if saml_request.is_some() {
            debug!(target: "security::saml", outcome = "continue", "IdP-initiated Single Logout");
            self.backend()
                .saml_invalidate(
                    request.search_without_leading_question_mark(),
                    &self.acs_url(),
                )
                .await
        } else {
            debug!(target: "security::saml", outcome = "continue", "user-initiated logout");
            let state = prior_state.expect("has_access_token implies prior_state is present");
            self.backend()
                .saml_logout(
                    state.access_token.as_deref().unwrap_or_default(),
                    state.refresh_token.as_deref(),
                )
                .await
        };

        match outcome {
            Ok(response) => {
                debug!(target: "security::saml", outcome = "redirect", "logout accepted by backend");
                DeauthenticationResult::redirect_to(response.redirect.unwrap_or_else(|| "/logged_out".to_string()))
            }
            Err(err) => {
                debug!(target: "security::saml", outcome = "failed", "logout call rejected by backend");
                DeauthenticationResult::failed(err)
            }
        }
    }
}
