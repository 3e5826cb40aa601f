// Configuration service wire types
//
// Read-side payloads are camelCase; write-side payloads are PascalCase —
// that asymmetry is the service's contract, not ours. Fields use
// `#[serde(default)]` liberally because the backend omits fields freely.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Device groups ────────────────────────────────────────────────────

/// List envelope from `GET /devicegroups`.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceGroupList {
    #[serde(default)]
    pub items: Vec<DeviceGroupResource>,
}

/// One device group as the service returns it.
///
/// `id` is deliberately optional: records without one are dropped during
/// normalization instead of failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroupResource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionResource>,
    #[serde(default)]
    pub e_tag: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One membership condition inside a device group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionResource {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// Request body for `POST /devicegroups` and `PUT /devicegroups/{id}`.
///
/// The write side is PascalCase; `ETag` is only sent on updates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceGroupWrite {
    pub display_name: String,
    pub conditions: Vec<ConditionWrite>,
    #[serde(rename = "ETag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConditionWrite {
    pub key: String,
    pub operator: String,
    pub value: Value,
}

// ── Solution settings ────────────────────────────────────────────────

/// Theme document from `GET /solution-settings/theme`.
///
/// Only `AzureMapsKey` is PascalCase; the rest of the document is not.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeResource {
    #[serde(default, rename = "AzureMapsKey")]
    pub azure_maps_key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Decoded logo response: blob plus metadata headers.
///
/// `is_default` mirrors the `IsDefault` response header. When it is true
/// the body is ignored and `logo`/`name` are `None`, which consumers read
/// as "fall back to the built-in branding".
#[derive(Debug, Clone)]
pub struct LogoResponse {
    pub logo: Option<Bytes>,
    pub content_type: Option<String>,
    pub name: Option<String>,
    pub is_default: bool,
}

/// Upload payload for `PUT /solution-settings/logo`.
///
/// `image: None` clears the custom logo (the service receives an empty
/// body, matching how the console resets branding).
#[derive(Debug, Clone, Default)]
pub struct LogoUpload {
    pub image: Option<Bytes>,
    pub content_type: Option<String>,
    pub name: Option<String>,
}

// ── Release feed ─────────────────────────────────────────────────────

/// Latest release from a GitHub-releases shaped feed.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseResource {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}
