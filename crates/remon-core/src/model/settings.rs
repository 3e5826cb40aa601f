// ── Solution settings domain types ──
//
// Branding, theme, and release info. These are UI-adjacent values the
// store carries next to the entity cache.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Built-in logo used until the service provides a custom one.
pub const DEFAULT_LOGO_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><rect width="32" height="32" rx="6" fill="#1f6feb"/><path d="M8 22V10h5.5a4.5 4.5 0 0 1 2.2 8.4L19 22h-3.4l-2.8-3.2H11V22z" fill="#fff"/></svg>"##;

/// Built-in application name shown next to the logo.
pub const DEFAULT_APPLICATION_NAME: &str = "Remon";

/// Color scheme of the console.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Logo and application name, either the built-in defaults or whatever a
/// solution operator uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub logo: Bytes,
    pub content_type: Option<String>,
    pub name: String,
    pub is_default_logo: bool,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            logo: Bytes::from_static(DEFAULT_LOGO_SVG),
            content_type: Some("image/svg+xml".to_owned()),
            name: DEFAULT_APPLICATION_NAME.to_owned(),
            is_default_logo: true,
        }
    }
}

/// Replacement logo as composed by an operator. `image: None` clears the
/// custom logo and restores the built-in branding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogoDraft {
    pub image: Option<Bytes>,
    pub content_type: Option<String>,
    pub name: Option<String>,
}

/// Version and release-notes link of the deployed solution. Fetched once,
/// informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub version: String,
    pub release_notes_url: String,
}
