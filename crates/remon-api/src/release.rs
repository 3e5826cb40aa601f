// Release feed client
//
// Fetches "what's new" information from a GitHub-releases shaped feed,
// e.g. `https://api.github.com/repos/<owner>/<repo>/`. Always
// unauthenticated; the feed is public.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ReleaseResource;
use crate::transport::TransportOptions;

/// Async client for the release feed.
#[derive(Clone)]
pub struct ReleaseClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReleaseClient {
    /// Build from the feed base URL. Any bearer token in `transport` is
    /// deliberately not forwarded to the feed.
    pub fn new(base_url: &str, transport: &TransportOptions) -> Result<Self, Error> {
        let http = transport.anonymous().build_client()?;
        let mut base_url = Url::parse(base_url)?;

        let path = base_url.path().trim_end_matches('/').to_owned();
        base_url.set_path(&format!("{path}/"));

        Ok(Self { http, base_url })
    }

    /// Fetch the latest published release.
    ///
    /// `GET /releases/latest`
    pub async fn latest_release(&self) -> Result<ReleaseResource, Error> {
        let url = self
            .base_url
            .join("releases/latest")
            .expect("path should be valid relative URL");
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}
