//! Data models: the request shape, session state, and result values.

mod request;
mod result;
mod state;

pub use request::{AuthorizationHeader, Request};
pub use result::{AuthenticationResult, BackendUser, DeauthenticationResult};
pub use state::ProviderState;
