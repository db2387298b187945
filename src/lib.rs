//! SAML 2.0 Web-SSO authentication provider
//!
//! This crate implements the credential-extraction state machine for a SAML service provider:
//! given a request and its prior session state, decide whether the caller is authenticated,
//! whether a SAML handshake needs to start, or whether the request should be redirected to the
//! identity provider. It deliberately does not speak HTTP, parse SAML XML, or validate
//! cryptographic assertions — those are the job of the [`services::Backend`] implementation the
//! embedding application supplies.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

pub use config::{ProviderConfig, ProviderOptions};
pub use models::{
    AuthenticationResult, AuthorizationHeader, BackendUser, DeauthenticationResult,
    ProviderState, Request,
};
pub use services::{Backend, LogoutResponse, SamlPrepareResponse, SamlProvider, TokenPair};
pub use utils::error::{BackendError, ProviderError};
