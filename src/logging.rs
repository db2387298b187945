//! Structured logging setup
//!
//! The provider emits its decision trail on the `security::saml` target at debug level (see
//! `services::provider`); it never logs token values, SAML response bodies, or anything else that
//! would leak a credential into a log sink. This module just wires up a console subscriber for
//! applications (and tests) that want the default texture.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize a compact console subscriber.
///
/// `filter` is a standard `tracing_subscriber::EnvFilter` directive string (e.g.
/// `"security::saml=debug"`), used unless `RUST_LOG` is set in the environment.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(true))
        .init();
}
