//! Configuration management
//!
//! `ProviderConfig` is the serializable subset of a provider's runtime configuration: the
//! externally visible coordinates of this service provider (`protocol`, `hostname`, `port`,
//! `base_path`), loaded the layered way — defaults, then an optional file, then environment
//! variables — the embedding application already uses elsewhere in this codebase.
//!
//! `ProviderOptions` is the full runtime configuration `SamlProvider::new` takes: the same
//! coordinates plus the `Backend` handle, which has no sensible serialized form and is always
//! supplied by the embedding application at startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::backend::Backend;

/// The serializable half of a provider's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub protocol: String,
    pub hostname: String,
    pub port: u16,
    pub base_path: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            protocol: "https".to_string(),
            hostname: "localhost".to_string(),
            port: 5601,
            base_path: String::new(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration layered as defaults, then `config/saml.toml` if present, then
    /// `SAML_`-prefixed environment variables (`SAML_HOSTNAME`, `SAML_PORT`, ...).
    ///
    /// A `.env` file in the working directory, if present, is merged into the process
    /// environment before the environment layer is read.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("protocol", defaults.protocol)?
            .set_default("hostname", defaults.hostname)?
            .set_default("port", defaults.port as i64)?
            .set_default("base_path", defaults.base_path)?
            .add_source(config::File::with_name("config/saml").required(false))
            .add_source(config::Environment::with_prefix("SAML"))
            .build()
            .context("failed to assemble provider configuration")?;

        settings
            .try_deserialize()
            .context("failed to parse provider configuration")
    }

    /// Attach a backend handle to produce the full [`ProviderOptions`] a [`SamlProvider`] needs.
    ///
    /// [`SamlProvider`]: crate::services::provider::SamlProvider
    pub fn with_client(self, client: Arc<dyn Backend>) -> ProviderOptions {
        ProviderOptions {
            protocol: self.protocol,
            hostname: self.hostname,
            port: self.port,
            base_path: self.base_path,
            client,
        }
    }
}

/// The full runtime configuration a [`SamlProvider`](crate::services::provider::SamlProvider)
/// needs: the serializable coordinates plus the backend it calls out to.
#[derive(Clone)]
pub struct ProviderOptions {
    pub protocol: String,
    pub hostname: String,
    pub port: u16,
    pub base_path: String,
    pub client: Arc<dyn Backend>,
}

impl ProviderOptions {
    pub fn new(config: ProviderConfig, client: Arc<dyn Backend>) -> Self {
        config.with_client(client)
    }
}
