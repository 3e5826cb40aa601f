// Shared transport configuration for building reqwest::Client instances.
//
// The configuration service and release feed clients share timeout, TLS,
// and auth-header settings through this module.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

const USER_AGENT: &str = concat!("remon/", env!("CARGO_PKG_VERSION"));

/// Shared transport options for building HTTP clients.
///
/// `accept_invalid_certs` exists for self-hosted solutions fronted by a
/// self-signed certificate; it is off by default.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    pub timeout: Option<Duration>,
    pub bearer_token: Option<SecretString>,
    pub accept_invalid_certs: bool,
}

impl TransportOptions {
    /// Build a `reqwest::Client` from these options.
    ///
    /// When a bearer token is set it is installed as a default
    /// `Authorization` header and marked sensitive so it never shows up in
    /// debug output.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(30)))
            .user_agent(USER_AGENT);

        if let Some(token) = &self.bearer_token {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|_| Error::InvalidToken)?;
            value.set_sensitive(true);
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder.build()?)
    }

    /// Options for an unauthenticated client (the release feed).
    pub fn anonymous(&self) -> Self {
        Self {
            timeout: self.timeout,
            bearer_token: None,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}
