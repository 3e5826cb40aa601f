// ── Runtime connection configuration ──
//
// These types describe *how* to reach the configuration service.
// They carry credential data and connection tuning, but never touch disk.
// The embedding application constructs a `ConsoleConfig` and hands it in.

use std::time::Duration;

use remon_api::TransportOptions;
use secrecy::SecretString;

/// Default release feed queried for update notices.
pub const DEFAULT_RELEASE_FEED_URL: &str = "https://api.github.com/repos/remon-io/remon";

/// Configuration for a single console session.
///
/// Built by the embedding application, passed to `Console` -- core never
/// reads config files.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Configuration service base URL (e.g., `https://solution.example/config/v1/`).
    pub service_url: String,
    /// Bearer token attached to every configuration-service request.
    pub access_token: Option<SecretString>,
    /// Release feed base URL. The feed is queried anonymously.
    pub release_feed_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Skip TLS verification (self-signed deployments).
    pub accept_invalid_certs: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8080/config/v1/".into(),
            access_token: None,
            release_feed_url: DEFAULT_RELEASE_FEED_URL.into(),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl ConsoleConfig {
    /// Transport settings for the HTTP clients built from this config.
    pub(crate) fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout: Some(self.timeout),
            bearer_token: self.access_token.clone(),
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}
