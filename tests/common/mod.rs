//! Fake backend for testing
//!
//! Provides a hand-rolled, scriptable implementation of [`saml_sso_provider::Backend`] so the
//! provider's strategy chain can be exercised without any real SAML/JWT transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fake::{Dummy, Fake, Faker};
use rstest::fixture;
use saml_sso_provider::{
    BackendError, BackendUser, LogoutResponse, SamlPrepareResponse, TokenPair,
};
use uuid::Uuid;

/// A single scripted outcome for a `FakeBackend` call.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Ok(T),
    Err(BackendError),
}

/// A fake [`Backend`](saml_sso_provider::Backend) whose responses are scripted per-call, in the
/// order they're expected to be consumed.
///
/// Each method pops the next scripted outcome off its own queue. Calling a method with an empty
/// queue panics, which surfaces test authoring mistakes (an unexpected extra call) immediately
/// rather than silently returning a default.
#[derive(Default)]
pub struct FakeBackend {
    authenticate: Mutex<VecDeque<Outcome<BackendUser>>>,
    saml_prepare: Mutex<VecDeque<Outcome<SamlPrepareResponse>>>,
    saml_authenticate: Mutex<VecDeque<Outcome<TokenPair>>>,
    get_access_token: Mutex<VecDeque<Outcome<TokenPair>>>,
    saml_logout: Mutex<VecDeque<Outcome<LogoutResponse>>>,
    saml_invalidate: Mutex<VecDeque<Outcome<LogoutResponse>>>,
    /// Every `Authorization` header value this fake ever saw passed to `authenticate`, in order.
    pub seen_authorizations: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_authenticate(&self, outcome: Outcome<BackendUser>) -> &Self {
        self.authenticate.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_saml_prepare(&self, outcome: Outcome<SamlPrepareResponse>) -> &Self {
        self.saml_prepare.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_saml_authenticate(&self, outcome: Outcome<TokenPair>) -> &Self {
        self.saml_authenticate.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_get_access_token(&self, outcome: Outcome<TokenPair>) -> &Self {
        self.get_access_token.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_saml_logout(&self, outcome: Outcome<LogoutResponse>) -> &Self {
        self.saml_logout.lock().unwrap().push_back(outcome);
        self
    }

    pub fn push_saml_invalidate(&self, outcome: Outcome<LogoutResponse>) -> &Self {
        self.saml_invalidate.lock().unwrap().push_back(outcome);
        self
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Outcome<T>>>, what: &str) -> Result<T, BackendError> {
    match queue.lock().unwrap().pop_front() {
        Some(Outcome::Ok(value)) => Ok(value),
        Some(Outcome::Err(err)) => Err(err),
        None => panic!("FakeBackend::{what} called with no scripted outcome left"),
    }
}

#[async_trait]
impl saml_sso_provider::Backend for FakeBackend {
    async fn authenticate(&self, authorization: &str) -> Result<BackendUser, BackendError> {
        self.seen_authorizations
            .lock()
            .unwrap()
            .push(authorization.to_string());
        pop(&self.authenticate, "authenticate")
    }

    async fn saml_prepare(&self, _acs: &str) -> Result<SamlPrepareResponse, BackendError> {
        pop(&self.saml_prepare, "saml_prepare")
    }

    async fn saml_authenticate(
        &self,
        _ids: &[String],
        _content: &str,
    ) -> Result<TokenPair, BackendError> {
        pop(&self.saml_authenticate, "saml_authenticate")
    }

    async fn get_access_token(&self, _refresh_token: &str) -> Result<TokenPair, BackendError> {
        pop(&self.get_access_token, "get_access_token")
    }

    async fn saml_logout(
        &self,
        _token: &str,
        _refresh_token: Option<&str>,
    ) -> Result<LogoutResponse, BackendError> {
        pop(&self.saml_logout, "saml_logout")
    }

    async fn saml_invalidate(
        &self,
        _query_string: &str,
        _acs: &str,
    ) -> Result<LogoutResponse, BackendError> {
        pop(&self.saml_invalidate, "saml_invalidate")
    }
}

/// A minimal "authenticated user" payload, good enough for assertions that only check identity.
pub fn fake_user(username: &str) -> BackendUser {
    serde_json::json!({ "username": username })
}

/// A randomly generated identity, for scenarios that need *some* user but don't care which.
#[derive(Debug, Dummy)]
pub struct FakeIdentity {
    #[dummy(faker = "fake::faker::internet::en::Username()")]
    pub username: String,
}

/// A fresh `(username, user payload)` pair with a faker-generated username.
pub fn random_fake_user() -> (String, BackendUser) {
    let identity: FakeIdentity = Faker.fake();
    let user = fake_user(&identity.username);
    (identity.username, user)
}

/// A freshly generated SAML request id, for scenarios that don't care about its exact value.
pub fn random_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// A bare request with `can_redirect` true and everything else defaulted, the shape most
/// scenarios start from.
pub fn base_request() -> saml_sso_provider::Request {
    saml_sso_provider::Request {
        can_redirect: true,
        base_path: String::new(),
        path: "/app/dashboard".to_string(),
        ..Default::default()
    }
}

/// Build a [`SamlProvider`](saml_sso_provider::SamlProvider) wired to `backend`, at a fixed,
/// predictable address.
pub fn provider_with(
    backend: Arc<dyn saml_sso_provider::Backend>,
) -> saml_sso_provider::SamlProvider {
    saml_sso_provider::SamlProvider::new(saml_sso_provider::ProviderOptions {
        protocol: "https".to_string(),
        hostname: "kibana.example.com".to_string(),
        port: 5601,
        base_path: String::new(),
        client: backend,
    })
}

/// `rstest` fixture: a fresh, unscripted `FakeBackend`.
#[fixture]
pub fn fake_backend() -> Arc<FakeBackend> {
    Arc::new(FakeBackend::new())
}

/// `rstest` fixture: a bare redirect-capable request (see [`base_request`]).
#[fixture]
pub fn fixture_request() -> saml_sso_provider::Request {
    base_request()
}
