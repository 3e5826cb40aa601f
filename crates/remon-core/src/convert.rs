// ── API-to-domain type conversions ──
//
// Bridges raw `remon_api` payloads into canonical `remon_core::model`
// domain types. Each conversion normalizes field names, fills sensible
// defaults for missing optional data, and drops records the console
// cannot address.

use std::collections::BTreeMap;

use tracing::warn;

use remon_api::models::{
    ConditionResource, ConditionWrite, DeviceGroupResource, DeviceGroupWrite, LogoResponse,
    LogoUpload, ReleaseResource, ThemeResource,
};

use crate::model::{
    Branding, Condition, ConditionOperator, DeviceGroup, DeviceGroupDraft, LogoDraft, ReleaseInfo,
};

// ── Device groups ──────────────────────────────────────────────────

impl From<ConditionResource> for Condition {
    fn from(c: ConditionResource) -> Self {
        Condition {
            key: c.key.unwrap_or_default(),
            // A condition without an operator is malformed; equality is the
            // least surprising reading.
            operator: c
                .operator
                .as_deref()
                .map_or(ConditionOperator::Eq, ConditionOperator::from),
            value: c.value,
        }
    }
}

impl From<&Condition> for ConditionWrite {
    fn from(c: &Condition) -> Self {
        ConditionWrite {
            key: c.key.clone(),
            operator: c.operator.as_str().to_owned(),
            value: c.value.clone(),
        }
    }
}

/// Convert a single wire record, or `None` when the service omitted its id.
pub fn device_group_from_wire(resource: DeviceGroupResource) -> Option<DeviceGroup> {
    let id = resource.id.filter(|id| !id.is_empty())?;
    Some(DeviceGroup {
        id,
        display_name: resource.display_name.unwrap_or_default(),
        conditions: resource
            .conditions
            .into_iter()
            .map(Condition::from)
            .collect(),
        e_tag: resource.e_tag,
    })
}

/// Normalize a full listing into the id-keyed entity map.
///
/// Records without an id cannot be selected, updated, or deleted, so they
/// are dropped with a warning instead of failing the whole refresh.
pub fn device_groups_from_wire(
    items: Vec<DeviceGroupResource>,
) -> BTreeMap<String, DeviceGroup> {
    let mut groups = BTreeMap::new();
    for resource in items {
        let display_name = resource.display_name.clone();
        match device_group_from_wire(resource) {
            Some(group) => {
                groups.insert(group.id.clone(), group);
            }
            None => warn!(?display_name, "dropping device group without an id"),
        }
    }
    groups
}

/// Build the write payload for create and update calls.
///
/// `e_tag` is `None` on create; updates echo the tag the cache holds so
/// the service can reject writes against a stale revision.
pub fn group_write(draft: &DeviceGroupDraft, e_tag: Option<&str>) -> DeviceGroupWrite {
    DeviceGroupWrite {
        display_name: draft.display_name.clone(),
        conditions: draft.conditions.iter().map(ConditionWrite::from).collect(),
        e_tag: e_tag.map(str::to_owned),
    }
}

// ── Solution settings ──────────────────────────────────────────────

/// Extract the maps key from the theme document, treating blank values as
/// absent.
pub fn maps_key_from_theme(theme: ThemeResource) -> Option<String> {
    theme.azure_maps_key.filter(|key| !key.trim().is_empty())
}

impl From<LogoDraft> for LogoUpload {
    fn from(draft: LogoDraft) -> Self {
        LogoUpload {
            image: draft.image,
            content_type: draft.content_type,
            name: draft.name,
        }
    }
}

impl From<LogoResponse> for Branding {
    fn from(response: LogoResponse) -> Self {
        let mut branding = Branding::default();
        if response.is_default {
            return branding;
        }
        // The name header applies on its own; a solution can rename the
        // console while keeping the built-in logo.
        if let Some(name) = response.name {
            branding.name = name;
        }
        if let Some(logo) = response.logo {
            branding.logo = logo;
            branding.content_type = response.content_type;
            branding.is_default_logo = false;
        }
        branding
    }
}

// ── Release feed ───────────────────────────────────────────────────

/// Convert the latest-release record, or `None` when the feed carries no
/// usable tag.
pub fn release_info_from_wire(release: ReleaseResource) -> Option<ReleaseInfo> {
    let tag = release
        .tag_name
        .or(release.name)
        .filter(|tag| !tag.is_empty())?;
    let version = tag.strip_prefix(['v', 'V']).unwrap_or(tag.as_str()).to_owned();
    Some(ReleaseInfo {
        version,
        release_notes_url: release.html_url.unwrap_or_default(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resource(id: Option<&str>, display_name: &str) -> DeviceGroupResource {
        DeviceGroupResource {
            id: id.map(str::to_owned),
            display_name: Some(display_name.to_owned()),
            conditions: Vec::new(),
            e_tag: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn listing_drops_records_without_an_id() {
        let items = vec![
            resource(Some("chillers"), "Chillers"),
            resource(None, "Orphan"),
            resource(Some(""), "Blank"),
            resource(Some("trucks"), "Trucks"),
        ];

        let groups = device_groups_from_wire(items);
        assert_eq!(groups.len(), 2);
        assert!(groups.contains_key("chillers"));
        assert!(groups.contains_key("trucks"));
    }

    #[test]
    fn missing_display_name_becomes_empty() {
        let mut r = resource(Some("g1"), "");
        r.display_name = None;
        let group = device_group_from_wire(r).unwrap();
        assert_eq!(group.display_name, "");
    }

    #[test]
    fn condition_operator_defaults_to_equality() {
        let condition: Condition = ConditionResource {
            key: Some("Region".into()),
            operator: None,
            value: json!("CA"),
        }
        .into();
        assert_eq!(condition.operator, ConditionOperator::Eq);

        let condition: Condition = ConditionResource {
            key: Some("Region".into()),
            operator: Some("CONTAINS".into()),
            value: json!("CA"),
        }
        .into();
        assert_eq!(condition.operator, ConditionOperator::Other("CONTAINS".into()));
    }

    #[test]
    fn write_payload_echoes_the_etag() {
        let draft = DeviceGroupDraft {
            display_name: "Chillers".into(),
            conditions: vec![Condition {
                key: "Type".into(),
                operator: ConditionOperator::Eq,
                value: json!("Chiller"),
            }],
        };

        let body = group_write(&draft, Some("rev-7"));
        assert_eq!(body.e_tag.as_deref(), Some("rev-7"));
        assert_eq!(body.conditions[0].operator, "EQ");

        let body = group_write(&draft, None);
        assert_eq!(body.e_tag, None);
    }

    #[test]
    fn default_logo_response_yields_builtin_branding() {
        let branding: Branding = LogoResponse {
            logo: Some(bytes::Bytes::from_static(b"ignored")),
            content_type: Some("image/png".into()),
            name: Some("Ignored".into()),
            is_default: true,
        }
        .into();
        assert_eq!(branding, Branding::default());
    }

    #[test]
    fn custom_logo_response_carries_blob_and_name() {
        let branding: Branding = LogoResponse {
            logo: Some(bytes::Bytes::from_static(b"<svg/>")),
            content_type: Some("image/svg+xml".into()),
            name: Some("Contoso Fleet".into()),
            is_default: false,
        }
        .into();
        assert!(!branding.is_default_logo);
        assert_eq!(branding.logo.as_ref(), b"<svg/>");
        assert_eq!(branding.name, "Contoso Fleet");
    }

    #[test]
    fn name_header_applies_without_a_blob() {
        let branding: Branding = LogoResponse {
            logo: None,
            content_type: None,
            name: Some("Contoso Fleet".into()),
            is_default: false,
        }
        .into();
        assert!(branding.is_default_logo);
        assert_eq!(branding.name, "Contoso Fleet");
        assert_eq!(branding.logo, Branding::default().logo);
    }

    #[test]
    fn blank_maps_key_reads_as_absent() {
        let theme = ThemeResource {
            azure_maps_key: Some("  ".into()),
            name: None,
            description: None,
        };
        assert_eq!(maps_key_from_theme(theme), None);
    }

    #[test]
    fn release_version_strips_tag_prefix() {
        let info = release_info_from_wire(ReleaseResource {
            tag_name: Some("v3.0.1".into()),
            name: None,
            html_url: Some("https://example.test/releases/v3.0.1".into()),
        })
        .unwrap();
        assert_eq!(info.version, "3.0.1");
        assert_eq!(info.release_notes_url, "https://example.test/releases/v3.0.1");

        assert_eq!(
            release_info_from_wire(ReleaseResource {
                tag_name: None,
                name: None,
                html_url: None,
            }),
            None
        );
    }
}
