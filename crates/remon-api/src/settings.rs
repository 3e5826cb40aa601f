// Solution settings endpoints
//
// The theme document is plain JSON; the logo travels as a binary body with
// its metadata in the `IsDefault` / `Name` / `Content-Type` headers.

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::client::ConfigClient;
use crate::error::Error;
use crate::models::{LogoResponse, LogoUpload, ThemeResource};

const HEADER_IS_DEFAULT: &str = "IsDefault";
const HEADER_NAME: &str = "Name";

impl ConfigClient {
    /// Fetch the solution theme document (map key and friends).
    ///
    /// `GET /solution-settings/theme`
    pub async fn get_theme(&self) -> Result<ThemeResource, Error> {
        debug!("fetching solution theme");
        self.get("solution-settings/theme").await
    }

    /// Fetch the solution logo.
    ///
    /// `GET /solution-settings/logo` — binary body. When the `IsDefault`
    /// header reads true the body is ignored entirely.
    pub async fn get_logo(&self) -> Result<LogoResponse, Error> {
        let resp = self
            .request(Method::GET, "solution-settings/logo")
            .send()
            .await?;
        decode_logo_response(self, resp).await
    }

    /// Upload (or clear) the solution logo.
    ///
    /// `PUT /solution-settings/logo` — binary body plus `Name` and
    /// `Content-Type` headers. An empty body clears the custom logo.
    pub async fn set_logo(&self, upload: &LogoUpload) -> Result<LogoResponse, Error> {
        debug!(
            has_image = upload.image.is_some(),
            name = upload.name.as_deref(),
            "uploading solution logo"
        );

        let mut req = self
            .request(Method::PUT, "solution-settings/logo")
            .body(upload.image.clone().unwrap_or_default());
        if let Some(name) = &upload.name {
            req = req.header(HEADER_NAME, name);
        }
        if let Some(content_type) = &upload.content_type {
            req = req.header(CONTENT_TYPE, content_type);
        }

        let resp = req.send().await?;
        decode_logo_response(self, resp).await
    }
}

/// Decode the shared logo response shape of both GET and PUT.
///
/// Unreadable metadata headers degrade to absence rather than failing the
/// whole call; a missing field means "use the default branding".
async fn decode_logo_response(
    client: &ConfigClient,
    resp: reqwest::Response,
) -> Result<LogoResponse, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(client.parse_error(status, resp).await);
    }

    let header_text = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    let is_default = header_text(HEADER_IS_DEFAULT)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
    if is_default {
        return Ok(LogoResponse {
            logo: None,
            content_type: None,
            name: None,
            is_default: true,
        });
    }

    let name = header_text(HEADER_NAME);
    let content_type = header_text(CONTENT_TYPE.as_str());
    let body = resp.bytes().await?;
    let logo = if body.is_empty() { None } else { Some(body) };

    Ok(LogoResponse {
        logo,
        content_type,
        name,
        is_default: false,
    })
}
