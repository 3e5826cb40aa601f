// ── Device group domain types ──

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// A named set of membership conditions used to select devices for
/// rules and monitoring. The canonical record every consumer sees;
/// wire-shape quirks stop at the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceGroup {
    pub id: String,
    pub display_name: String,
    pub conditions: Vec<Condition>,
    /// Concurrency stamp issued by the service; `None` until the record
    /// has round-tripped through it.
    pub e_tag: Option<String>,
}

/// One filter clause attached to a device group. Owned exclusively by its
/// parent record, no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,
    pub operator: ConditionOperator,
    /// Comparison operand; the service accepts strings and numbers, so the
    /// value stays a raw JSON scalar.
    pub value: Value,
}

/// Comparison operator grammar of the service's filter language.
///
/// `Other` keeps forward compatibility with operators the service may add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ConditionOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    Other(String),
}

impl ConditionOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Le => "LE",
            Self::Ge => "GE",
            Self::In => "IN",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConditionOperator {
    fn from(raw: &str) -> Self {
        match raw {
            "EQ" => Self::Eq,
            "NE" => Self::Ne,
            "LT" => Self::Lt,
            "GT" => Self::Gt,
            "LE" => Self::Le,
            "GE" => Self::Ge,
            "IN" => Self::In,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ConditionOperator {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<ConditionOperator> for String {
    fn from(op: ConditionOperator) -> Self {
        op.as_str().to_owned()
    }
}

/// A device group as composed in an editor, before the service has issued
/// an id or etag for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceGroupDraft {
    pub display_name: String,
    pub conditions: Vec<Condition>,
}

impl DeviceGroupDraft {
    /// Check the draft the way the console's forms do, before anything is
    /// dispatched or sent over the wire.
    pub fn validate(&self) -> Result<(), Error> {
        if self.display_name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Name is required".into(),
            });
        }
        for condition in &self.conditions {
            if condition.key.trim().is_empty() {
                return Err(Error::Validation {
                    message: "Condition field is required".into(),
                });
            }
            if condition.value.is_null() {
                return Err(Error::Validation {
                    message: "Condition value is required".into(),
                });
            }
        }
        Ok(())
    }
}
