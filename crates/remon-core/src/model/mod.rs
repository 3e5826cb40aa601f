// ── Canonical domain model ──
//
// Every type here is the canonical representation consumers depend on.
// Wire-shape quirks (casing, envelopes, optional ids) are resolved in
// `convert` before anything reaches this layer.

pub mod group;
pub mod settings;

pub use group::{Condition, ConditionOperator, DeviceGroup, DeviceGroupDraft};
pub use settings::{
    Branding, DEFAULT_APPLICATION_NAME, DEFAULT_LOGO_SVG, LogoDraft, ReleaseInfo, Theme,
};
